//! Arcade minigames: Flappy, Snake, Memory.
//!
//! Every game follows the same shape: a `types` module with the simulation
//! state, a `logic` module with input handling and the tick, and an
//! implementation of [`Minigame`] so a [`Session`] can drive it.

use crate::core::scheduler::TimerSpec;
use crate::scores::BestOrdering;
use rand::Rng;

pub mod flappy;
pub mod memory;
pub mod session;
pub mod snake;

pub use flappy::{FlappyGame, FlappyIntent};
pub use memory::{MemoryGame, MemoryIntent};
pub use session::{GameEnd, Session};
pub use snake::{SnakeGame, SnakeIntent};

/// Which game a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Flappy,
    Snake,
    Memory,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Flappy, GameKind::Snake, GameKind::Memory];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(GameKind::Flappy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flappy => "Focus Flappy",
            Self::Snake => "Habit Snake",
            Self::Memory => "Memory Match",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Self::Flappy => "Tap to fly through pipes",
            Self::Snake => "Eat habits, grow longer",
            Self::Memory => "Match wellness cards",
        }
    }

    /// Key of the persisted best record for this game.
    pub fn best_key(&self) -> &'static str {
        match self {
            Self::Flappy => "flappy_high_score",
            Self::Snake => "snake_high_score",
            Self::Memory => "memory_high_score",
        }
    }

    /// Higher score wins for the action games; fewer moves wins for Memory.
    pub fn best_ordering(&self) -> BestOrdering {
        match self {
            Self::Flappy | Self::Snake => BestOrdering::HigherWins,
            Self::Memory => BestOrdering::LowerWins,
        }
    }

    /// Source tag sent with XP grants.
    pub fn source_tag(&self) -> &'static str {
        match self {
            Self::Flappy => "arcade_flappy",
            Self::Snake => "arcade_snake",
            Self::Memory => "arcade_memory",
        }
    }
}

/// Lifecycle of one game session.
///
/// `Idle -> Playing -> GameOver` for the action games,
/// `Idle -> Playing -> Won` for Memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation frozen, waiting for the first input.
    Idle,
    Playing,
    /// Crashed. Only an explicit restart continues.
    GameOver,
    /// All pairs matched.
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Named timer a game wants running. At most one live timer per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerSlot {
    /// Physics / movement tick.
    Physics,
    /// Wall-clock seconds counter (Memory).
    Clock,
    /// Delay before a mismatched pair flips back (Memory).
    Reveal,
    /// How long a matched card's tip stays visible (Memory).
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub slot: TimerSlot,
    pub spec: TimerSpec,
}

impl TimerRequest {
    pub fn new(slot: TimerSlot, spec: TimerSpec) -> Self {
        Self { slot, spec }
    }
}

/// A game the session driver can run.
///
/// Implementations never fail: invalid input is a silent no-op and
/// collisions or wins are phase transitions.
pub trait Minigame {
    type Intent: Copy + std::fmt::Debug;

    const KIND: GameKind;

    fn phase(&self) -> GamePhase;

    /// Apply one user intent immediately.
    fn apply_intent<R: Rng + ?Sized>(&mut self, intent: Self::Intent, rng: &mut R);

    /// A timer in `slot` fired.
    fn on_timer<R: Rng + ?Sized>(&mut self, slot: TimerSlot, rng: &mut R);

    /// Timers the game needs in its current state. Terminal games want none.
    fn wanted_timers(&self) -> Vec<TimerRequest>;

    /// Value handed to the end-of-session listener.
    fn final_score(&self) -> u32;

    /// Value offered to the best-record store when the session ends, if any.
    fn best_candidate(&self) -> Option<u32>;

    /// Back to a fresh `Idle` game.
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R);
}
