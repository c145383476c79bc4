//! Engine configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use charsmith_domain::Edition;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "characters.db";

/// Errors raised while reading configuration or the files it points at.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule set: {0}")]
    RuleSet(#[from] charsmith_domain::RuleSetError),
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Storage backend for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SQLite database file (`CHARSMITH_DB_PATH`)
    pub db_path: PathBuf,
    /// Optional JSON rule set replacing the built-in SRD subset (`CHARSMITH_RULESET_PATH`)
    pub ruleset_path: Option<PathBuf>,
    /// `CHARSMITH_STORAGE`: "sqlite" or "memory"
    pub storage: StorageKind,
    /// Edition used when creation input leaves it out (`CHARSMITH_DEFAULT_EDITION`)
    pub default_edition: Edition,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            ruleset_path: None,
            storage: StorageKind::Sqlite,
            default_edition: Edition::E2014,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match present("CHARSMITH_STORAGE") {
            None => defaults.storage,
            Some(value) => match value.trim().to_lowercase().as_str() {
                "sqlite" => StorageKind::Sqlite,
                "memory" => StorageKind::Memory,
                _ => {
                    return Err(ConfigError::invalid(
                        "CHARSMITH_STORAGE",
                        value,
                        "expected 'sqlite' or 'memory'",
                    ))
                }
            },
        };

        let default_edition = match present("CHARSMITH_DEFAULT_EDITION") {
            None => defaults.default_edition,
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::invalid("CHARSMITH_DEFAULT_EDITION", value.clone(), e))?,
        };

        Ok(Self {
            db_path: present("CHARSMITH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            ruleset_path: present("CHARSMITH_RULESET_PATH").map(PathBuf::from),
            storage,
            default_edition,
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("CHARSMITH_DB_PATH", "/tmp/party.db"),
            ("CHARSMITH_RULESET_PATH", "rules.json"),
            ("CHARSMITH_STORAGE", "Memory"),
            ("CHARSMITH_DEFAULT_EDITION", "2024"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/party.db"));
        assert_eq!(config.ruleset_path, Some(PathBuf::from("rules.json")));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.default_edition, Edition::E2024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[("CHARSMITH_RULESET_PATH", "  ")])).unwrap();
        assert_eq!(config.ruleset_path, None);
    }

    #[test]
    fn rejects_unknown_storage() {
        let err = EngineConfig::from_lookup(lookup(&[("CHARSMITH_STORAGE", "postgres")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "CHARSMITH_STORAGE",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_edition() {
        let err =
            EngineConfig::from_lookup(lookup(&[("CHARSMITH_DEFAULT_EDITION", "5e")])).unwrap_err();
        assert!(err.to_string().contains("CHARSMITH_DEFAULT_EDITION"));
    }
}
