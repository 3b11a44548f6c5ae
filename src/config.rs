//! Runtime settings, read from the environment (and `.env` when present).

use crate::error::ConfigError;
use crate::listings::batch::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "LISTINGS_BASE_URL";
pub const TOKEN_ENV: &str = "LISTINGS_TOKEN";
pub const BATCH_SIZE_ENV: &str = "LISTINGS_BATCH_SIZE";
pub const BATCH_DELAY_ENV: &str = "LISTINGS_BATCH_DELAY_MS";
pub const LEDGER_DIR_ENV: &str = "LEDGER_DIR";

const DEFAULT_LEDGER_DIR: &str = "ledger";

#[derive(Debug, Clone)]
pub struct Config {
    pub listings_base_url: String,
    pub listings_token: String,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub ledger_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Only the ledger location, for commands that never touch the feed
    pub fn ledger_dir_from_env() -> PathBuf {
        let _ = dotenvy::dotenv();
        Self::ledger_dir_from_lookup(|name| std::env::var(name).ok())
    }

    pub fn ledger_dir_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        lookup(LEDGER_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_DIR))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let batch_size = match lookup(BATCH_SIZE_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: BATCH_SIZE_ENV,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let batch_delay = match lookup(BATCH_DELAY_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    name: BATCH_DELAY_ENV,
                    value: raw.clone(),
                })?,
            None => DEFAULT_BATCH_DELAY,
        };

        Ok(Self {
            listings_base_url: required(BASE_URL_ENV)?,
            listings_token: required(TOKEN_ENV)?,
            batch_size,
            batch_delay,
            ledger_dir: Self::ledger_dir_from_lookup(&lookup),
        })
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_absent() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://feed.test"),
            (TOKEN_ENV, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.batch_size, 5);
        assert_eq!(config.batch_delay, Duration::from_millis(500));
        assert_eq!(config.ledger_dir, PathBuf::from("ledger"));
    }

    #[test]
    fn missing_token_is_reported() {
        let only_url = lookup(&[(BASE_URL_ENV, "https://feed.test")]);
        let err = Config::from_lookup(only_url).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(TOKEN_ENV)));
    }

    #[test]
    fn ledger_dir_resolves_without_feed_settings() {
        let dir = Config::ledger_dir_from_lookup(lookup(&[(LEDGER_DIR_ENV, "/srv/ledgers")]));
        assert_eq!(dir, PathBuf::from("/srv/ledgers"));
        assert_eq!(Config::ledger_dir_from_lookup(lookup(&[])), PathBuf::from("ledger"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://feed.test"),
            (TOKEN_ENV, "secret"),
            (BATCH_SIZE_ENV, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: BATCH_SIZE_ENV, .. }));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://feed.test"),
            (TOKEN_ENV, "secret"),
            (BATCH_SIZE_ENV, " 8 "),
            (BATCH_DELAY_ENV, "0"),
            (LEDGER_DIR_ENV, "/tmp/ledgers"),
        ]))
        .unwrap();
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.batch_delay, Duration::ZERO);
        assert_eq!(config.ledger_dir, PathBuf::from("/tmp/ledgers"));
    }
}
