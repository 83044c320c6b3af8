//! Habit Snake minigame.
//!
//! Classic grid snake: steer with the arrow keys, eat food to grow and speed
//! up, and avoid the walls and your own body.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
