//! Configuration to acknowledge deployment preferences as well as set defaults.
//!
//! Specifically, we try to find a paramgrid.toml, and if present we load
//! settings from there. This provides the poll cadence and the file size
//! threshold that switches between the fast and slow cadence.

use facet::Facet;
use std::fs;
use std::time::Duration;

#[derive(Facet, Clone)]
/// User preferences loaded from paramgrid.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 1000)]
    /// Poll interval for small files, in milliseconds.
    pub small_poll_interval_ms: u64,
    #[facet(default = 2000)]
    /// Poll interval for files past the size threshold, in milliseconds.
    pub large_poll_interval_ms: u64,
    #[facet(default = 10 * 1024)]
    /// File size in bytes beyond which the slower poll interval applies.
    pub large_file_threshold: u64,
}

impl Config {
    #[must_use]
    /// Load configuration from paramgrid.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("paramgrid.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Poll cadence for a file of the given size.
    ///
    /// Small files poll faster so edits feel live; large files poll slower to
    /// bound read overhead.
    pub fn poll_interval(&self, file_size: u64) -> Duration {
        if file_size < self.large_file_threshold {
            Duration::from_millis(self.small_poll_interval_ms)
        } else {
            Duration::from_millis(self.large_poll_interval_ms)
        }
    }
}
