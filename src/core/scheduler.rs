//! Timer scheduling for game loops.
//!
//! Games never talk to a wall clock directly. A session asks a [`Scheduler`]
//! for repeating, next-frame or one-shot timers and gets a [`TimerHandle`]
//! back; the host polls [`Scheduler::take_due`] and hands the fired handles to
//! the session. [`ManualScheduler`] advances only when told to, which makes
//! whole sessions replayable in tests. [`FrameScheduler`] measures real
//! elapsed time between polls.

use std::time::{Duration, Instant};

/// Length of one frame. A next-frame timer fires once this much time has
/// passed since it was scheduled, however often the host polls.
pub const FRAME_BUDGET_MS: u64 = 16;

/// Longest stretch of wall-clock time a single poll may account for.
/// Prevents a burst of catch-up ticks after the terminal was suspended.
pub const MAX_FRAME_DT_MS: u64 = 500;

/// Opaque identity of a scheduled timer. Never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// How a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSpec {
    /// Fires every `n` milliseconds until cancelled.
    Repeating(u64),
    /// Fires once on the next frame ([`FRAME_BUDGET_MS`] from now), then expires.
    NextFrame,
    /// Fires once after `n` milliseconds, then expires.
    Once(u64),
}

impl TimerSpec {
    /// Delay of a one-shot timer, `None` for repeating ones.
    fn one_shot_delay_ms(&self) -> Option<u64> {
        match self {
            TimerSpec::Repeating(_) => None,
            TimerSpec::NextFrame => Some(FRAME_BUDGET_MS),
            TimerSpec::Once(delay_ms) => Some(*delay_ms),
        }
    }
}

/// The scheduling capability a game loop depends on.
pub trait Scheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerHandle;

    fn schedule_repeating(&mut self, interval_ms: u64) -> TimerHandle {
        self.schedule(TimerSpec::Repeating(interval_ms))
    }

    fn schedule_next_frame(&mut self) -> TimerHandle {
        self.schedule(TimerSpec::NextFrame)
    }

    fn schedule_once(&mut self, delay_ms: u64) -> TimerHandle {
        self.schedule(TimerSpec::Once(delay_ms))
    }

    /// Cancel a timer. Cancelling an expired or unknown handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);

    /// True while the timer can still fire.
    fn is_scheduled(&self, handle: TimerHandle) -> bool;

    /// Handles that came due since the previous call, in firing order.
    /// A repeating timer appears once per elapsed interval.
    fn take_due(&mut self) -> Vec<TimerHandle>;
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    spec: TimerSpec,
    /// Milliseconds accumulated toward the next firing.
    accumulated_ms: u64,
}

/// Bookkeeping shared by both scheduler implementations.
#[derive(Debug, Default, Clone)]
pub struct TimerTable {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, spec: TimerSpec) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            spec,
            accumulated_ms: 0,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Move every timer forward by `dt_ms` and return what fired.
    ///
    /// Firings are ordered by the offset within `dt_ms` at which they
    /// happened; ties go to the older timer. Expired one-shot timers are
    /// dropped from the table.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<TimerHandle> {
        // (offset within this advance, timer index, handle)
        let mut fired: Vec<(u64, usize, TimerHandle)> = Vec::new();

        for (index, timer) in self.timers.iter_mut().enumerate() {
            match (timer.spec, timer.spec.one_shot_delay_ms()) {
                (TimerSpec::Repeating(interval_ms), _) => {
                    let interval_ms = interval_ms.max(1);
                    let mut offset = interval_ms - timer.accumulated_ms;
                    while offset <= dt_ms {
                        fired.push((offset, index, timer.handle));
                        offset += interval_ms;
                    }
                    timer.accumulated_ms = (timer.accumulated_ms + dt_ms) % interval_ms;
                }
                (_, delay) => {
                    let remaining = delay
                        .unwrap_or(0)
                        .saturating_sub(timer.accumulated_ms);
                    if remaining <= dt_ms {
                        fired.push((remaining, index, timer.handle));
                    }
                    timer.accumulated_ms += dt_ms;
                }
            }
        }

        self.timers.retain(|t| match t.spec.one_shot_delay_ms() {
            None => true,
            Some(delay_ms) => t.accumulated_ms < delay_ms,
        });

        fired.sort_by_key(|&(offset, index, _)| (offset, index));
        fired.into_iter().map(|(_, _, handle)| handle).collect()
    }
}

/// Deterministic scheduler: time moves only through [`ManualScheduler::advance`].
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    table: TimerTable,
    pending: Vec<TimerHandle>,
    now_ms: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `dt_ms` of simulated time pass. Fired timers queue up for
    /// the next [`Scheduler::take_due`].
    pub fn advance(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
        let fired = self.table.advance(dt_ms);
        self.pending.extend(fired);
    }

    /// Total simulated time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.table.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerHandle {
        self.table.schedule(spec)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.table.cancel(handle);
        self.pending.retain(|&h| h != handle);
    }

    fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.table.contains(handle)
    }

    fn take_due(&mut self) -> Vec<TimerHandle> {
        std::mem::take(&mut self.pending)
    }
}

/// Wall-clock scheduler used by the terminal host. Each poll accounts for the
/// whole milliseconds since the previous poll, capped at [`MAX_FRAME_DT_MS`].
/// The sub-millisecond remainder carries over, so rapid polls still add up.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    table: TimerTable,
    last_poll: Instant,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            table: TimerTable::new(),
            last_poll: Instant::now(),
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerHandle {
        self.table.schedule(spec)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.table.cancel(handle);
    }

    fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.table.contains(handle)
    }

    fn take_due(&mut self) -> Vec<TimerHandle> {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last_poll).as_millis() as u64;
        let dt_ms = if elapsed_ms > MAX_FRAME_DT_MS {
            self.last_poll = now;
            MAX_FRAME_DT_MS
        } else {
            self.last_poll += Duration::from_millis(elapsed_ms);
            elapsed_ms
        };
        self.table.advance(dt_ms)
    }
}
