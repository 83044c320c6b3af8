//! Focus Flappy minigame.
//!
//! A real-time action game where the player keeps a bird airborne and
//! threads it through scrolling pipe gaps. Gravity pulls the bird down every
//! frame, a jump resets its velocity upward, and touching a pipe, the
//! ceiling or the floor ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
