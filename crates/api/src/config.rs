//! Process configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first (if present); real
//! environment variables win over it.

use std::time::Duration;

use thiserror::Error;

use localshop_inventory::notification::NOTIFICATION_TTL_SECS;
use localshop_inventory::stock_log::DEFAULT_ACTOR;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `PORT`
    pub port: u16,
    /// `DATABASE_URL`. Recorded for operators; no document store is attached.
    pub database_url: Option<String>,
    /// `SEED_SAMPLE_DATA`
    pub seed_sample_data: bool,
    /// `INVENTORY_ACTOR`: user written on stock log entries.
    pub actor: String,
    /// `NOTIFICATION_TTL_SECS`
    pub notification_ttl_secs: i64,
    /// `NOTIFICATION_SWEEP_MS`: how often expired notifications are dropped.
    pub sweep_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            seed_sample_data: true,
            actor: DEFAULT_ACTOR.to_string(),
            notification_ttl_secs: NOTIFICATION_TTL_SECS,
            sweep_interval: Duration::from_secs(1),
        }
    }
}

impl ApiConfig {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };
        let seed_sample_data = match get("SEED_SAMPLE_DATA") {
            Some(raw) => parse_bool("SEED_SAMPLE_DATA", &raw)?,
            None => defaults.seed_sample_data,
        };
        let notification_ttl_secs = match get("NOTIFICATION_TTL_SECS") {
            Some(raw) => {
                let secs: i64 = parse_number("NOTIFICATION_TTL_SECS", &raw)?;
                if secs <= 0 {
                    return Err(ConfigError::Invalid {
                        key: "NOTIFICATION_TTL_SECS",
                        value: raw,
                        reason: "must be positive".to_string(),
                    });
                }
                secs
            }
            None => defaults.notification_ttl_secs,
        };
        let sweep_interval = match get("NOTIFICATION_SWEEP_MS") {
            Some(raw) => Duration::from_millis(parse_number("NOTIFICATION_SWEEP_MS", &raw)?),
            None => defaults.sweep_interval,
        };

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            seed_sample_data,
            actor: get("INVENTORY_ACTOR").unwrap_or(defaults.actor),
            notification_ttl_secs,
            sweep_interval,
        })
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
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
    fn empty_environment_uses_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.actor, "Admin");
    }

    #[test]
    fn reads_every_key() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("DATABASE_URL", "mongodb://localhost/shop"),
            ("SEED_SAMPLE_DATA", "no"),
            ("INVENTORY_ACTOR", "Manager"),
            ("NOTIFICATION_TTL_SECS", "9"),
            ("NOTIFICATION_SWEEP_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.database_url.as_deref(), Some("mongodb://localhost/shop"));
        assert!(!config.seed_sample_data);
        assert_eq!(config.actor, "Manager");
        assert_eq!(config.notification_ttl_secs, 9);
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = ApiConfig::from_lookup(lookup(&[("SEED_SAMPLE_DATA", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SEED_SAMPLE_DATA", .. }));

        let err = ApiConfig::from_lookup(lookup(&[("NOTIFICATION_TTL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "NOTIFICATION_TTL_SECS", .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ApiConfig::from_lookup(lookup(&[("PORT", "  "), ("DATABASE_URL", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.database_url.is_none());
    }
}
