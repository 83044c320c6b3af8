//! Experience point ledger client.
//!
//! Game ends are reported fire-and-forget: the request runs on its own
//! thread and a failure is only logged. Nothing here can stall or fail a
//! game. The host calls [`XpReporter::flush`] before exiting so sends still
//! in flight get a chance to finish.

use super::config::ArcadeConfig;
use super::rewards::{grant_for, XpGrant};
use crate::challenges::GameEnd;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

const USER_AGENT: &str = "arcade";

/// How often `flush` checks on sends still running.
const FLUSH_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger rejected grant with status {0}")]
    Status(u16),
    #[error("ledger unreachable: {0}")]
    Transport(String),
}

impl From<ureq::Error> for LedgerError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => LedgerError::Status(code),
            ureq::Error::Transport(t) => LedgerError::Transport(t.to_string()),
        }
    }
}

/// Somewhere XP grants can be recorded.
pub trait XpLedger: Send + Sync {
    fn add_xp(&self, grant: &XpGrant) -> Result<(), LedgerError>;
}

/// Posts grants as JSON to `{api_url}/gamification/add-xp`.
pub struct HttpXpLedger {
    agent: ureq::Agent,
    url: String,
}

impl HttpXpLedger {
    pub fn new(config: &ArcadeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout())
            .build();
        Self {
            agent,
            url: config.add_xp_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl XpLedger for HttpXpLedger {
    fn add_xp(&self, grant: &XpGrant) -> Result<(), LedgerError> {
        self.agent
            .post(&self.url)
            .set("User-Agent", USER_AGENT)
            .send_json(grant)?;
        Ok(())
    }
}

/// Tallies XP for the running arcade and forwards grants to a ledger.
pub struct XpReporter {
    ledger: Option<Arc<dyn XpLedger>>,
    total_xp: u32,
    in_flight: Vec<JoinHandle<()>>,
}

impl XpReporter {
    pub fn new(ledger: Arc<dyn XpLedger>) -> Self {
        Self {
            ledger: Some(ledger),
            total_xp: 0,
            in_flight: Vec::new(),
        }
    }

    /// Counts XP locally but never sends it.
    pub fn offline() -> Self {
        Self {
            ledger: None,
            total_xp: 0,
            in_flight: Vec::new(),
        }
    }

    /// Build from config: HTTP when reporting is enabled, offline otherwise.
    pub fn from_config(config: &ArcadeConfig) -> Self {
        if config.xp_reporting {
            log::info!("Reporting XP to {}", config.add_xp_url());
            Self::new(Arc::new(HttpXpLedger::new(config)))
        } else {
            log::info!("XP reporting disabled");
            Self::offline()
        }
    }

    /// XP earned since the arcade opened.
    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    pub fn is_online(&self) -> bool {
        self.ledger.is_some()
    }

    /// Record a finished session. Returns true if a send was started.
    pub fn report(&mut self, end: &GameEnd) -> bool {
        let Some(grant) = grant_for(end) else {
            return false;
        };
        self.total_xp = self.total_xp.saturating_add(grant.amount);

        let Some(ledger) = self.ledger.as_ref().map(Arc::clone) else {
            return false;
        };
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.push(thread::spawn(move || match ledger.add_xp(&grant) {
            Ok(()) => log::info!("Awarded {} XP ({})", grant.amount, grant.description),
            Err(e) => log::warn!("Failed to award XP: {}", e),
        }));
        true
    }

    /// Sends started and not yet joined.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Wait up to `timeout` for in-flight sends. Returns how many were still
    /// running when time ran out; those are left detached.
    pub fn flush(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        while self.in_flight.iter().any(|h| !h.is_finished()) && Instant::now() < deadline {
            thread::sleep(FLUSH_POLL);
        }

        let (done, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|h| h.is_finished());
        for handle in done {
            if handle.join().is_err() {
                log::warn!("XP send thread panicked");
            }
        }
        if !running.is_empty() {
            log::warn!("Giving up on {} XP send(s) still in flight", running.len());
        }
        running.len()
    }
}
