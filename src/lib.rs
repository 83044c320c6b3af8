//! Arcade - terminal mini-games with persistent bests and XP rewards.
//!
//! This module exposes the game logic for testing and the binary.

pub mod challenges;
pub mod core;
pub mod host;
pub mod input;
pub mod scores;
pub mod ui;
pub mod utils;
