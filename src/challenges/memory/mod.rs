//! Memory Match minigame.
//!
//! Sixteen face-down cards hold eight wellness faces, two of each. Flip two
//! at a time; a match stays up and shows its tip, a mismatch flips back
//! after a short delay. Finishing the board pays a flat reward, and the
//! fewest moves is kept as the best record.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
