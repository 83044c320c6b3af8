//! Memory Match data structures.

use crate::challenges::GamePhase;
use crate::core::clock::SimulationClock;
use rand::seq::SliceRandom;
use rand::Rng;

/// A card face: the symbol shown and the wellness tip revealed on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub id: u8,
    pub emoji: &'static str,
    pub tip: &'static str,
}

/// The face catalogue. Each face is dealt exactly twice.
pub const FACES: [Face; 8] = [
    Face { id: 1, emoji: "🏃", tip: "Daily exercise" },
    Face { id: 2, emoji: "💧", tip: "Stay hydrated" },
    Face { id: 3, emoji: "😴", tip: "Quality sleep" },
    Face { id: 4, emoji: "🥗", tip: "Eat healthy" },
    Face { id: 5, emoji: "🧘", tip: "Meditation" },
    Face { id: 6, emoji: "📚", tip: "Keep learning" },
    Face { id: 7, emoji: "🌳", tip: "Nature walks" },
    Face { id: 8, emoji: "💪", tip: "Stay active" },
];

pub const PAIR_COUNT: u32 = FACES.len() as u32;
pub const DECK_SIZE: usize = FACES.len() * 2;
pub const GRID_COLUMNS: usize = 4;

/// How long a mismatched pair stays face-up.
pub const MISMATCH_DELAY_MS: u64 = 1000;
/// How long a matched face's tip stays on screen.
pub const TIP_DURATION_MS: u64 = 2000;
/// Elapsed time is counted in whole seconds.
pub const CLOCK_INTERVAL_MS: u64 = 1000;

/// XP paid for a completed board regardless of moves or time.
pub const MEMORY_REWARD: u32 = 25;

/// One physical card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCard {
    /// Index into [`FACES`]; the pair partner has the same value.
    pub face: usize,
    /// Position in the unshuffled deck. Unique per card.
    pub instance_id: usize,
    pub flipped: bool,
    /// Terminal once set.
    pub matched: bool,
}

impl MemoryCard {
    pub fn face(&self) -> &'static Face {
        &FACES[self.face % FACES.len()]
    }

    pub fn is_face_up(&self) -> bool {
        self.flipped || self.matched
    }
}

/// Build the unshuffled deck: the catalogue twice, instance ids `0..DECK_SIZE`.
pub fn ordered_deck() -> Vec<MemoryCard> {
    (0..DECK_SIZE)
        .map(|instance_id| MemoryCard {
            face: instance_id % FACES.len(),
            instance_id,
            flipped: false,
            matched: false,
        })
        .collect()
}

/// Build and shuffle a deck (Fisher-Yates via `SliceRandom::shuffle`).
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<MemoryCard> {
    let mut deck = ordered_deck();
    deck.shuffle(rng);
    deck
}

/// Cursor movement across the 4-column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    pub phase: GamePhase,
    pub cards: Vec<MemoryCard>,
    /// Indices of face-up cards awaiting resolution. Never more than two.
    pub pending: Vec<usize>,
    /// Completed pair attempts.
    pub moves: u32,
    pub matches: u32,
    /// Counts whole seconds while playing.
    pub clock: SimulationClock,
    /// Tip of the most recent match while it is on screen.
    pub tip: Option<&'static str>,
    /// Highlighted card for keyboard play.
    pub cursor: usize,
}

impl MemoryGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            phase: GamePhase::Idle,
            cards: shuffled_deck(rng),
            pending: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
            clock: SimulationClock::new(CLOCK_INTERVAL_MS),
            tip: None,
            cursor: 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed
    }

    /// A mismatched pair is showing and selections are locked.
    pub fn awaiting_flip_back(&self) -> bool {
        self.pending.len() >= 2
    }

    /// Row count of the dealt grid.
    pub fn rows(&self) -> usize {
        self.cards.len().div_ceil(GRID_COLUMNS)
    }
}

/// Elapsed seconds as `m:ss`.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
