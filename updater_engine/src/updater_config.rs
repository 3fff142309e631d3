use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    pub firmware_url: String,
    pub effects_url: String,
    /// size of the blocks the response body is written in
    pub chunk_size: usize,
    pub listing_timeout_secs: u64,
    /// applies to connecting and to every read, not to the whole transfer
    pub download_timeout_secs: u64,
    pub default_save_ext: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            firmware_url: "http://localhost:8000/firmware".into(),
            effects_url: "http://localhost:8000/effects".into(),
            chunk_size: 1024 * 64,
            listing_timeout_secs: 8,
            download_timeout_secs: 12,
            default_save_ext: ".bin".into(),
        }
    }
}

impl UpdaterConfig {
    pub fn base_url(&self, category: Category) -> &str {
        match category {
            Category::Firmware => &self.firmware_url,
            Category::Effects => &self.effects_url,
        }
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
