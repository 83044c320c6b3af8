//! Focus Flappy data structures.
//!
//! Coordinates are playfield pixels: x grows to the right, y grows downward,
//! the origin is the top-left corner.

use crate::challenges::GamePhase;
use crate::core::clock::SimulationClock;
use rand::Rng;

/// Playfield dimensions.
pub const PLAYFIELD_WIDTH: f64 = 400.0;
pub const PLAYFIELD_HEIGHT: f64 = 500.0;

/// Bird fixed horizontal position (left edge) and square size.
pub const BIRD_X: f64 = 50.0;
pub const BIRD_SIZE: f64 = 30.0;
pub const BIRD_START_Y: f64 = 250.0;

/// Lowest valid top edge for the bird; anything past it is a floor hit.
pub const FLOOR_Y: f64 = PLAYFIELD_HEIGHT - BIRD_SIZE;

/// Velocity change per tick (positive = downward).
pub const GRAVITY: f64 = 0.5;

/// Velocity set by a jump. Overrides, never adds.
pub const JUMP_VELOCITY: f64 = -8.0;

pub const PIPE_WIDTH: f64 = 60.0;
/// Vertical opening between the top and bottom pipe segments.
pub const PIPE_GAP: f64 = 150.0;
/// Leftward scroll per tick.
pub const PIPE_SPEED: f64 = 3.0;
/// New pipes enter at the right edge.
pub const PIPE_SPAWN_X: f64 = PLAYFIELD_WIDTH;
/// A new pipe spawns once the newest pipe has scrolled left of this.
pub const PIPE_SPAWN_TRIGGER_X: f64 = 250.0;

/// Gap start is drawn from `[GAP_START_MIN, GAP_START_MIN + GAP_START_RANGE)`.
pub const GAP_START_MIN: f64 = 100.0;
pub const GAP_START_RANGE: f64 = 250.0;

/// Physics runs once per frame; this is the nominal frame length.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Axis-aligned box, edges in playfield pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// The bird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top edge.
    pub y: f64,
    /// Pixels per tick, positive = falling. Unbounded downward.
    pub velocity: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            y: BIRD_START_Y,
            velocity: 0.0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: BIRD_X,
            right: BIRD_X + BIRD_SIZE,
            top: self.y,
            bottom: self.y + BIRD_SIZE,
        }
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A pipe pair with a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge, decreasing every tick.
    pub x: f64,
    /// Top of the gap. Fixed at spawn.
    pub gap_start: f64,
    /// Set once when the bird clears the pipe.
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, gap_start: f64) -> Self {
        Self {
            x,
            gap_start,
            passed: false,
        }
    }

    /// Trailing (right) edge.
    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    /// Bottom of the gap.
    pub fn gap_end(&self) -> f64 {
        self.gap_start + PIPE_GAP
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes in spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    /// Pipes passed.
    pub score: u32,
    pub clock: SimulationClock,
}

impl FlappyGame {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            bird: Bird::new(),
            pipes: Vec::new(),
            score: 0,
            clock: SimulationClock::new(FRAME_INTERVAL_MS),
        }
    }

    /// Spawn a pipe at the right edge with a random gap.
    pub fn spawn_pipe<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let gap_start = GAP_START_MIN + rng.gen::<f64>() * GAP_START_RANGE;
        self.pipes.push(Pipe::new(PIPE_SPAWN_X, gap_start));
    }

    /// True when no pipe exists or the newest one has moved far enough left.
    pub fn should_spawn_pipe(&self) -> bool {
        self.pipes
            .last()
            .map_or(true, |newest| newest.x < PIPE_SPAWN_TRIGGER_X)
    }
}

impl Default for FlappyGame {
    fn default() -> Self {
        Self::new()
    }
}
