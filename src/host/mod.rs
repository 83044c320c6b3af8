//! Host page collaborators: configuration, XP conversion and the XP ledger.
//!
//! The games themselves only ever emit a [`GameEnd`](crate::challenges::GameEnd);
//! everything about turning that into experience points lives here.

pub mod arcade;
pub mod config;
pub mod rewards;
pub mod xp_ledger;

pub use arcade::{ActiveGame, Arcade, SharedStore};
pub use config::ArcadeConfig;
pub use rewards::{xp_for, XpGrant};
pub use xp_ledger::{HttpXpLedger, LedgerError, XpLedger, XpReporter};
