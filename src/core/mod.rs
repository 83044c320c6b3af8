//! Core timing primitives shared by every minigame.

pub mod clock;
pub mod scheduler;

pub use clock::SimulationClock;
pub use scheduler::{FrameScheduler, ManualScheduler, Scheduler, TimerHandle, TimerSpec};
