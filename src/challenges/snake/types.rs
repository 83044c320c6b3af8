//! Habit Snake data structures.

use crate::challenges::GamePhase;
use crate::core::clock::SimulationClock;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Square grid side length in cells.
pub const GRID_SIZE: i16 = 20;

/// Movement interval at the start of a run.
pub const INITIAL_INTERVAL_MS: u64 = 150;
/// Each food shortens the interval by this much...
pub const SPEEDUP_STEP_MS: u64 = 5;
/// ...down to this floor.
pub const MIN_INTERVAL_MS: u64 = 50;

/// Head cell of a fresh snake.
pub const START: Position = Position { x: 10, y: 10 };

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    pub phase: GamePhase,
    /// Body segments, head first. No two segments ever share a cell.
    pub snake: VecDeque<Position>,
    /// Direction that drove the most recent move.
    pub direction: Direction,
    /// Direction the next move will use. Validated against `direction`.
    pub next_direction: Direction,
    pub food: Position,
    /// Food eaten.
    pub score: u32,
    /// Tick interval lives here and shrinks as the snake eats.
    pub clock: SimulationClock,
}

impl SnakeGame {
    /// Create a new game: one segment at the start cell, heading right.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut snake = VecDeque::new();
        snake.push_back(START);

        let food = spawn_food(&snake, rng).unwrap_or(Position::new(START.x + 5, START.y));

        Self {
            phase: GamePhase::Idle,
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            clock: SimulationClock::new(INITIAL_INTERVAL_MS),
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn move_interval_ms(&self) -> u64 {
        self.clock.tick_interval_ms
    }
}

/// Pick a random free cell for food, or `None` if the snake fills the grid.
pub fn spawn_food<R: Rng + ?Sized>(snake: &VecDeque<Position>, rng: &mut R) -> Option<Position> {
    let free: Vec<Position> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();
    free.choose(rng).copied()
}
