use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CACHE_SLIDING_TTL_SECS: u64 = 300; // 5 minutes

/// Runtime settings for the customer repository and its cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Sliding expiration applied to every cached read.
    pub cache_sliding_ttl_secs: u64,
    /// Optional hard ceiling on how long a cached read may live.
    pub cache_absolute_ttl_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_sliding_ttl_secs: DEFAULT_CACHE_SLIDING_TTL_SECS,
            cache_absolute_ttl_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Loads settings from a JSON file; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn cache_sliding_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_sliding_ttl_secs)
    }

    pub fn cache_absolute_ttl(&self) -> Option<Duration> {
        self.cache_absolute_ttl_secs.map(Duration::from_secs)
    }
}
