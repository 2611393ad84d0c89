use std::{env, time::Duration};

use crate::errors::Error;

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const CALL_TIMEOUT_VAR: &str = "DYNAMODB_CALL_TIMEOUT_MS";

pub const DEFAULT_TABLE_NAME: &str = "verve-health-logs";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Process configuration, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub call_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            table_name: DEFAULT_TABLE_NAME.to_owned(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let table_name = var(TABLE_NAME_VAR).unwrap_or_else(|| DEFAULT_TABLE_NAME.to_owned());

        let call_timeout = match var(CALL_TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|err| Error::Config(format!("{}={:?}: {}", CALL_TIMEOUT_VAR, raw, err)))?,
            None => DEFAULT_CALL_TIMEOUT,
        };

        Ok(Config {
            table_name,
            call_timeout,
        })
    }
}
