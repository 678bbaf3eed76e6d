//! Configuration Module
//!
//! Handles loading and managing engine configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_LRU_CAPACITY;

/// Default interval in seconds between named-map expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL: u64 = 60;

/// Default separator written between key and value by the dump command.
pub const DEFAULT_DUMP_SEPARATOR: &str = "\t";

/// Engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the LRU cache can hold
    pub lru_capacity: usize,
    /// Expiry sweeper interval in seconds
    pub sweep_interval: u64,
    /// Separator used when dumping named maps to a file
    pub dump_separator: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum LRU entries (default: 100000, zero is ignored)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `DUMP_SEPARATOR` - Dump field separator (default: tab)
    pub fn from_env() -> Self {
        Self {
            lru_capacity: env::var("LRU_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_LRU_CAPACITY),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &u64| n > 0)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
            dump_separator: env::var("DUMP_SEPARATOR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DUMP_SEPARATOR.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lru_capacity: DEFAULT_LRU_CAPACITY,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            dump_separator: DEFAULT_DUMP_SEPARATOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.lru_capacity, 100_000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.dump_separator, "\t");
    }

    // Single test touching the environment so parallel tests cannot race on it.
    #[test]
    fn test_config_from_env() {
        env::remove_var("LRU_CAPACITY");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("DUMP_SEPARATOR");

        let config = Config::from_env();
        assert_eq!(config.lru_capacity, 100_000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.dump_separator, "\t");

        env::set_var("LRU_CAPACITY", "0");
        env::set_var("SWEEP_INTERVAL", "not-a-number");
        env::set_var("DUMP_SEPARATOR", "|");

        let config = Config::from_env();
        assert_eq!(config.lru_capacity, 100_000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.dump_separator, "|");

        env::set_var("LRU_CAPACITY", "512");
        env::set_var("SWEEP_INTERVAL", "5");
        let config = Config::from_env();
        assert_eq!(config.lru_capacity, 512);
        assert_eq!(config.sweep_interval, 5);

        env::remove_var("LRU_CAPACITY");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("DUMP_SEPARATOR");
    }
}
