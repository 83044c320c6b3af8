//! Arcade configuration, read from `~/.arcade/config.json`.

use crate::utils::persistence::{load_json_or_default, save_path};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "ARCADE_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Base URL of the gamification API.
    pub api_url: String,
    /// Send XP grants when a game ends.
    pub xp_reporting: bool,
    pub request_timeout_ms: u64,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            xp_reporting: true,
            request_timeout_ms: 5000,
        }
    }
}

impl ArcadeConfig {
    /// Load from `~/.arcade/config.json` and apply environment overrides.
    /// Missing or unreadable files give the defaults.
    pub fn load() -> Self {
        let config = match save_path(CONFIG_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("No arcade directory ({}), using default config", e);
                Self::default()
            }
        };
        config.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    /// Replace `api_url` when an override is present and non-blank.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Full URL of the add-xp endpoint.
    pub fn add_xp_url(&self) -> String {
        format!("{}/gamification/add-xp", self.api_url.trim_end_matches('/'))
    }
}
