//! The arcade page: a game menu, at most one running session, and the XP
//! tally fed by every finished session.

use super::xp_ledger::XpReporter;
use crate::challenges::{
    FlappyGame, FlappyIntent, GameEnd, GameKind, GamePhase, MemoryGame, MemoryIntent, Session,
    SnakeGame, SnakeIntent,
};
use crate::core::scheduler::Scheduler;
use crate::scores::BestScoreStore;
use rand::RngCore;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Best-score store shared by every session the arcade opens.
pub type SharedStore = Rc<RefCell<dyn BestScoreStore>>;

/// The session currently on screen.
pub enum ActiveGame {
    Flappy(Session<FlappyGame>),
    Snake(Session<SnakeGame>),
    Memory(Session<MemoryGame>),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Flappy(_) => GameKind::Flappy,
            Self::Snake(_) => GameKind::Snake,
            Self::Memory(_) => GameKind::Memory,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            Self::Flappy(s) => s.phase(),
            Self::Snake(s) => s.phase(),
            Self::Memory(s) => s.phase(),
        }
    }

    pub fn best(&self) -> Option<u32> {
        match self {
            Self::Flappy(s) => s.best(),
            Self::Snake(s) => s.best(),
            Self::Memory(s) => s.best(),
        }
    }

    fn run_due(&mut self, scheduler: &mut dyn Scheduler, rng: &mut dyn RngCore) -> bool {
        match self {
            Self::Flappy(s) => s.run_due(scheduler, rng),
            Self::Snake(s) => s.run_due(scheduler, rng),
            Self::Memory(s) => s.run_due(scheduler, rng),
        }
    }

    fn restart(&mut self, scheduler: &mut dyn Scheduler, rng: &mut dyn RngCore) {
        match self {
            Self::Flappy(s) => s.restart(scheduler, rng),
            Self::Snake(s) => s.restart(scheduler, rng),
            Self::Memory(s) => s.restart(scheduler, rng),
        }
    }

    fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        match self {
            Self::Flappy(s) => s.stop(scheduler),
            Self::Snake(s) => s.stop(scheduler),
            Self::Memory(s) => s.stop(scheduler),
        }
    }
}

pub struct Arcade {
    /// Highlighted menu entry.
    pub selected: usize,
    active: Option<ActiveGame>,
    scheduler: Box<dyn Scheduler>,
    rng: Box<dyn RngCore>,
    store: SharedStore,
    ends: Rc<RefCell<Vec<GameEnd>>>,
    reporter: XpReporter,
    last_end: Option<GameEnd>,
}

impl Arcade {
    pub fn new(
        scheduler: Box<dyn Scheduler>,
        rng: Box<dyn RngCore>,
        store: SharedStore,
        reporter: XpReporter,
    ) -> Self {
        Self {
            selected: 0,
            active: None,
            scheduler,
            rng,
            store,
            ends: Rc::new(RefCell::new(Vec::new())),
            reporter,
            last_end: None,
        }
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn selected_kind(&self) -> GameKind {
        GameKind::from_index(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < GameKind::ALL.len() {
            self.selected += 1;
        }
    }

    /// Stored best for the menu.
    pub fn best_for(&self, kind: GameKind) -> Option<u32> {
        self.store.borrow().load_best(kind.best_key())
    }

    pub fn total_xp(&self) -> u32 {
        self.reporter.total_xp()
    }

    /// Give in-flight XP sends up to `timeout` to finish. Returns how many
    /// were abandoned.
    pub fn flush_xp(&mut self, timeout: Duration) -> usize {
        self.reporter.flush(timeout)
    }

    /// Most recent finished session, cleared when a new game opens.
    pub fn last_end(&self) -> Option<&GameEnd> {
        self.last_end.as_ref()
    }

    /// Mount a fresh session of `kind`, replacing any running one.
    pub fn open(&mut self, kind: GameKind) {
        self.leave();
        self.last_end = None;
        let store: Box<dyn BestScoreStore> = Box::new(Rc::clone(&self.store));
        let sink = Rc::clone(&self.ends);
        let on_end = move |end: GameEnd| sink.borrow_mut().push(end);

        self.active = Some(match kind {
            GameKind::Flappy => ActiveGame::Flappy(Session::new(FlappyGame::new(), store, on_end)),
            GameKind::Snake => {
                let game = SnakeGame::new(self.rng.as_mut());
                ActiveGame::Snake(Session::new(game, store, on_end))
            }
            GameKind::Memory => {
                let game = MemoryGame::new(self.rng.as_mut());
                ActiveGame::Memory(Session::new(game, store, on_end))
            }
        });
    }

    pub fn open_selected(&mut self) {
        self.open(self.selected_kind());
    }

    /// Back to the menu. The running session is stopped without a report.
    pub fn leave(&mut self) {
        if let Some(mut game) = self.active.take() {
            game.stop(self.scheduler.as_mut());
        }
    }

    pub fn restart(&mut self) {
        if let Some(game) = self.active.as_mut() {
            game.restart(self.scheduler.as_mut(), self.rng.as_mut());
            self.last_end = None;
        }
    }

    /// Run due timers of the active session and forward any finished session
    /// to the reporter. Returns true if the game state changed.
    pub fn tick(&mut self) -> bool {
        let ran = match self.active.as_mut() {
            Some(game) => game.run_due(self.scheduler.as_mut(), self.rng.as_mut()),
            None => {
                self.scheduler.take_due();
                false
            }
        };
        self.drain_ends();
        ran
    }

    pub fn flappy(&mut self, intent: FlappyIntent) {
        if let Some(ActiveGame::Flappy(s)) = self.active.as_mut() {
            s.intent(intent, self.scheduler.as_mut(), self.rng.as_mut());
        }
        self.drain_ends();
    }

    pub fn snake(&mut self, intent: SnakeIntent) {
        if let Some(ActiveGame::Snake(s)) = self.active.as_mut() {
            s.intent(intent, self.scheduler.as_mut(), self.rng.as_mut());
        }
        self.drain_ends();
    }

    pub fn memory(&mut self, intent: MemoryIntent) {
        if let Some(ActiveGame::Memory(s)) = self.active.as_mut() {
            s.intent(intent, self.scheduler.as_mut(), self.rng.as_mut());
        }
        self.drain_ends();
    }

    fn drain_ends(&mut self) {
        let ends: Vec<GameEnd> = self.ends.borrow_mut().drain(..).collect();
        for end in ends {
            self.reporter.report(&end);
            self.last_end = Some(end);
        }
    }
}
