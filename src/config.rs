use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const CAPACITY_KEY: &str = "BYTERING_CAPACITY";
pub const GROWABLE_KEY: &str = "BYTERING_GROWABLE";
pub const READ_CHUNK_KEY: &str = "BYTERING_READ_CHUNK";
pub const WRITE_CHUNK_KEY: &str = "BYTERING_WRITE_CHUNK";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeConfig {
    pub capacity: usize,
    pub growable: bool,
    pub read_chunk: usize,
    pub write_chunk: usize,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            capacity: 64 * 1024,
            growable: false,
            read_chunk: 4096,
            write_chunk: 1500,
        }
    }
}

impl PipeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for keys it
    /// does not know.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity = parse_or(&lookup, CAPACITY_KEY, defaults.capacity)?;
        let growable = match lookup(GROWABLE_KEY) {
            Some(value) => parse_bool(GROWABLE_KEY, value)?,
            None => defaults.growable,
        };
        let read_chunk = parse_or(&lookup, READ_CHUNK_KEY, defaults.read_chunk)?;
        let write_chunk = parse_or(&lookup, WRITE_CHUNK_KEY, defaults.write_chunk)?;

        if capacity == 0 && !growable {
            return Err(ConfigError::Invalid {
                key: CAPACITY_KEY,
                value: capacity.to_string(),
                reason: "must be greater than zero unless the ring is growable",
            });
        }

        for (key, chunk) in [(READ_CHUNK_KEY, read_chunk), (WRITE_CHUNK_KEY, write_chunk)] {
            if chunk == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: chunk.to_string(),
                    reason: "must be greater than zero",
                });
            }
        }

        Ok(Self {
            capacity,
            growable,
            read_chunk,
            write_chunk,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key,
            value,
            reason: "expected a non-negative integer",
        }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected a boolean",
        }),
    }
}
