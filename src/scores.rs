//! Best-score records that outlive a session.
//!
//! One integer per game key. Storage problems never reach gameplay: an
//! unreadable record reads as "no previous best" and failed writes are
//! logged and dropped.

use crate::utils::persistence::{load_json_or_default, save_json, save_path};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// File under ~/.arcade/ holding every game's best record.
pub const BEST_SCORES_FILE: &str = "best_scores.json";

/// Which direction counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestOrdering {
    HigherWins,
    LowerWins,
}

impl BestOrdering {
    /// Strictly better than the current record. Ties never win.
    pub fn is_better(&self, candidate: u32, current: Option<u32>) -> bool {
        match (self, current) {
            (_, None) => true,
            (Self::HigherWins, Some(best)) => candidate > best,
            (Self::LowerWins, Some(best)) => candidate < best,
        }
    }
}

/// Key-value storage for best records.
pub trait BestScoreStore {
    /// Stored best for `key`, or `None` when absent or unreadable.
    fn load_best(&self, key: &str) -> Option<u32>;

    fn store_best(&mut self, key: &str, value: u32) -> io::Result<()>;
}

/// Store `candidate` if it beats the current record under `ordering`.
///
/// Returns true when `candidate` is a new best, even if writing it failed.
pub fn save_best_if_better<S: BestScoreStore + ?Sized>(
    store: &mut S,
    key: &str,
    candidate: u32,
    ordering: BestOrdering,
) -> bool {
    let current = store.load_best(key);
    if !ordering.is_better(candidate, current) {
        return false;
    }

    match store.store_best(key, candidate) {
        Ok(()) => log::info!("New best for {}: {} (was {:?})", key, candidate, current),
        Err(e) => log::warn!("Could not save best for {}: {}", key, e),
    }
    true
}

/// Best records kept in ~/.arcade/best_scores.json.
///
/// The file is re-read on every access, so the last writer wins when several
/// arcades share it.
#[derive(Debug, Clone)]
pub struct JsonBestScoreStore {
    path: PathBuf,
}

impl JsonBestScoreStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location under the user's home directory.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(save_path(BEST_SCORES_FILE)?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, Value> {
        load_json_or_default(&self.path)
    }
}

impl BestScoreStore for JsonBestScoreStore {
    fn load_best(&self, key: &str) -> Option<u32> {
        let value = self.read_all().remove(key)?;
        let best = parse_best(&value);
        if best.is_none() {
            log::warn!("Ignoring corrupt best record {} = {}", key, value);
        }
        best
    }

    fn store_best(&mut self, key: &str, value: u32) -> io::Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), Value::from(value));
        save_json(&self.path, &all)
    }
}

/// Accepts a non-negative integer or a string holding one.
fn parse_best(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Volatile store, used when the home directory is unavailable and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBestScoreStore {
    values: HashMap<String, u32>,
}

impl InMemoryBestScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for InMemoryBestScoreStore {
    fn load_best(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn store_best(&mut self, key: &str, value: u32) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// One store handed to several sessions in turn.
impl<S: BestScoreStore + ?Sized> BestScoreStore for Rc<RefCell<S>> {
    fn load_best(&self, key: &str) -> Option<u32> {
        self.borrow().load_best(key)
    }

    fn store_best(&mut self, key: &str, value: u32) -> io::Result<()> {
        self.borrow_mut().store_best(key, value)
    }
}
