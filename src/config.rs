//! App configuration
//!
//! Persisted in its own LocalStorage slot, separate from the person data.

use serde::{Deserialize, Serialize};

use crate::consts::{CONFIG_KEY, DEFAULT_PAGE_SIZE, DEFAULT_PHONE_CODE, PERSONS_KEY};
use crate::storage::KeyValueStorage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slot holding the person collection
    pub storage_key: String,
    /// Rows per table page
    pub page_size: usize,
    /// Dialing code preselected in a fresh form
    pub default_phone_code: String,
    /// Minimum log level (`error` .. `trace`)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: PERSONS_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            default_phone_code: DEFAULT_PHONE_CODE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from storage, using defaults for anything absent or unreadable
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        let loaded = match storage.get_item(CONFIG_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<AppConfig>(&json) {
                Ok(config) => {
                    log::info!("Loaded config from storage");
                    Some(config)
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable config: {}", err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("Config storage unavailable: {}", err);
                None
            }
        };

        let mut config = loaded.unwrap_or_else(|| {
            log::info!("Using default config");
            Self::default()
        });
        config.normalize();
        config
    }

    /// Save to storage; failures are logged
    pub fn save(&self, storage: &dyn KeyValueStorage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(CONFIG_KEY, &json) {
                Ok(()) => log::info!("Config saved"),
                Err(err) => log::warn!("Config not saved: {}", err),
            },
            Err(err) => log::warn!("Config not encoded: {}", err),
        }
    }

    fn normalize(&mut self) {
        self.page_size = self.page_size.max(1);
        if self.storage_key.trim().is_empty() {
            self.storage_key = PERSONS_KEY.to_string();
        }
    }
}
