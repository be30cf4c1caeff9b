//! Runtime configuration from environment variables
//!
//! - `DATA_DIR`: directory holding `inventory.json` (default `data`)
//! - `PORT`: listen port (default 3000)
//! - `TOAST_DISMISS_MS`: how long toasts stay up (default 5000)

use std::path::PathBuf;
use std::time::Duration;

use crate::notification::DEFAULT_DISMISS_AFTER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub toast_dismiss: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 3000,
            toast_dismiss: DEFAULT_DISMISS_AFTER,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparseable values fall back to the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            toast_dismiss: lookup("TOAST_DISMISS_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.toast_dismiss),
        }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join("inventory.json")
    }
}
