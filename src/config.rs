//! Runtime configuration
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file by `dotenvy` in `main`). Every setting has a default so the site runs
//! with no configuration at all.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STORAGE_KEY: &str = "bookingWizardData";
pub const DEFAULT_SERVICE_REGION: &str = "FL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Directory holding persisted booking records
    pub data_dir: PathBuf,
    /// Prefix for booking record storage keys
    pub storage_key: String,
    /// Serve availability from the in-memory mock calendar
    pub use_mock_data: bool,
    /// Seed for the mock "already booked" mask; random when unset
    pub availability_seed: Option<u64>,
    /// State code of the permitted service region
    pub service_region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            use_mock_data: true,
            availability_seed: None,
            service_region: DEFAULT_SERVICE_REGION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: v,
            })?,
            None => defaults.bind_addr,
        };

        let use_mock_data = match lookup("USE_MOCK_DATA") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "USE_MOCK_DATA",
                value: v,
            })?,
            None => defaults.use_mock_data,
        };

        let availability_seed = match lookup("AVAILABILITY_SEED") {
            Some(v) => Some(v.parse().map_err(|_| ConfigError::Invalid {
                key: "AVAILABILITY_SEED",
                value: v,
            })?),
            None => None,
        };

        let service_region = lookup("SERVICE_REGION")
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.service_region);

        Ok(Self {
            bind_addr,
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            storage_key: lookup("STORAGE_KEY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.storage_key),
            use_mock_data,
            availability_seed,
            service_region,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.storage_key, "bookingWizardData");
        assert!(config.use_mock_data);
        assert_eq!(config.availability_seed, None);
        assert_eq!(config.service_region, "FL");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("USE_MOCK_DATA", "no"),
            ("AVAILABILITY_SEED", "42"),
            ("SERVICE_REGION", " ga "),
            ("DATA_DIR", "/tmp/openair"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.use_mock_data);
        assert_eq!(config.availability_seed, Some(42));
        assert_eq!(config.service_region, "GA");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/openair"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup(&[("USE_MOCK_DATA", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup(&[("AVAILABILITY_SEED", "-1")])).is_err());
        assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).is_err());
    }
}
