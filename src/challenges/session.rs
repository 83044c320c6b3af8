//! Game loop driver shared by every minigame.
//!
//! A [`Session`] owns one game, the timers that drive it, and the
//! once-per-session end report. All mutation happens synchronously inside
//! [`Session::intent`] or [`Session::run_due`]; nothing else touches the game.

use super::{GameKind, GamePhase, Minigame, TimerSlot};
use crate::core::scheduler::{Scheduler, TimerHandle, TimerSpec};
use crate::scores::{save_best_if_better, BestScoreStore};
use rand::Rng;
use std::collections::BTreeMap;

/// Reported exactly once when a session reaches a terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEnd {
    pub kind: GameKind,
    /// Pipes passed, food eaten, or Memory's flat reward.
    pub score: u32,
    /// The session set a new best record.
    pub new_best: bool,
    /// Best record after this session.
    pub best: Option<u32>,
}

type GameEndListener = Box<dyn FnMut(GameEnd)>;

pub struct Session<G: Minigame> {
    game: G,
    timers: BTreeMap<TimerSlot, (TimerHandle, TimerSpec)>,
    store: Box<dyn BestScoreStore>,
    on_game_end: GameEndListener,
    best: Option<u32>,
    reported: bool,
}

impl<G: Minigame> Session<G> {
    /// Mount a game. Reads the stored best; a missing record is `None`.
    pub fn new(
        game: G,
        store: Box<dyn BestScoreStore>,
        on_game_end: impl FnMut(GameEnd) + 'static,
    ) -> Self {
        let best = store.load_best(G::KIND.best_key());
        log::info!("{} mounted (best {:?})", G::KIND.name(), best);
        Self {
            game,
            timers: BTreeMap::new(),
            store,
            on_game_end: Box::new(on_game_end),
            best,
            reported: false,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    /// Best record as of the last session start or end.
    pub fn best(&self) -> Option<u32> {
        self.best
    }

    /// True once this session's end has been reported.
    pub fn has_reported(&self) -> bool {
        self.reported
    }

    /// Number of timers this session currently holds.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Apply a user intent, then bring timers in line with the new state.
    pub fn intent<S, R>(&mut self, intent: G::Intent, scheduler: &mut S, rng: &mut R)
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        log::debug!("{} intent {:?}", G::KIND.name(), intent);
        self.game.apply_intent(intent, rng);
        self.sync(scheduler);
    }

    /// Dispatch every timer that came due. Returns true if anything ran.
    ///
    /// Ticks run one at a time, each followed by a sync, so a tick that ends
    /// the game cancels the remaining firings of the same batch.
    pub fn run_due<S, R>(&mut self, scheduler: &mut S, rng: &mut R) -> bool
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let mut ran = false;
        for handle in scheduler.take_due() {
            let Some(slot) = self.slot_of(handle) else {
                continue;
            };
            self.game.on_timer(slot, rng);
            self.sync(scheduler);
            ran = true;
        }
        ran
    }

    /// Throw the current game away and return to `Idle`.
    pub fn restart<S, R>(&mut self, scheduler: &mut S, rng: &mut R)
    where
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        self.stop(scheduler);
        self.game.reset(rng);
        self.reported = false;
        self.best = self.store.load_best(G::KIND.best_key());
        self.sync(scheduler);
        log::info!("{} restarted", G::KIND.name());
    }

    /// Cancel every timer without reporting, e.g. when the player leaves.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        for (_, (handle, _)) in std::mem::take(&mut self.timers) {
            scheduler.cancel(handle);
        }
    }

    fn slot_of(&self, handle: TimerHandle) -> Option<TimerSlot> {
        self.timers
            .iter()
            .find(|(_, (h, _))| *h == handle)
            .map(|(slot, _)| *slot)
    }

    /// Reconcile live timers with what the game wants, then report the end
    /// of the session if it was just reached.
    fn sync<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        let wanted = self.game.wanted_timers();

        let stale: Vec<TimerSlot> = self
            .timers
            .iter()
            .filter(|(slot, (handle, spec))| {
                !scheduler.is_scheduled(*handle)
                    || !wanted.iter().any(|w| w.slot == **slot && w.spec == *spec)
            })
            .map(|(slot, _)| *slot)
            .collect();
        for slot in stale {
            if let Some((handle, _)) = self.timers.remove(&slot) {
                scheduler.cancel(handle);
            }
        }

        for request in wanted {
            if !self.timers.contains_key(&request.slot) {
                let handle = scheduler.schedule(request.spec);
                self.timers.insert(request.slot, (handle, request.spec));
            }
        }

        if self.game.phase().is_terminal() && !self.reported {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.reported = true;
        let kind = G::KIND;

        let new_best = match self.game.best_candidate() {
            Some(candidate) => {
                let improved = save_best_if_better(
                    self.store.as_mut(),
                    kind.best_key(),
                    candidate,
                    kind.best_ordering(),
                );
                if improved {
                    self.best = Some(candidate);
                }
                improved
            }
            None => false,
        };

        let end = GameEnd {
            kind,
            score: self.game.final_score(),
            new_best,
            best: self.best,
        };
        log::info!("{} ended: {:?}", kind.name(), end);
        (self.on_game_end)(end);
    }
}
