//! Process settings, read once from the environment.
//!
//! | variable                    | default | meaning                                  |
//! |-----------------------------|---------|------------------------------------------|
//! | `SORT_TRACE_SEED`           | random  | seed for generated input                 |
//! | `SORT_TRACE_RANDOM_LEN`     | 8       | length of generated input                |
//! | `SORT_TRACE_RANDOM_MAX`     | 100     | generated values lie in `0..max`         |
//! | `SORT_TRACE_STACK_CAPACITY` | 100     | capacity of the stack demo's stack       |

use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use rand::{thread_rng, Rng};
use thiserror::Error;
use tracing::info;

pub const SEED_VAR: &str = "SORT_TRACE_SEED";
pub const RANDOM_LEN_VAR: &str = "SORT_TRACE_RANDOM_LEN";
pub const RANDOM_MAX_VAR: &str = "SORT_TRACE_RANDOM_MAX";
pub const STACK_CAPACITY_VAR: &str = "SORT_TRACE_STACK_CAPACITY";

pub const DEFAULT_RANDOM_LEN: usize = 8;
pub const DEFAULT_RANDOM_MAX: i32 = 100;
pub const DEFAULT_STACK_CAPACITY: usize = 100;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub random_len: usize,
    pub random_max: i32,
    pub stack_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            random_len: DEFAULT_RANDOM_LEN,
            random_max: DEFAULT_RANDOM_MAX,
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable source. Unset variables keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = parse_var(&lookup, SEED_VAR, "an unsigned 64-bit integer")?;
        let random_len = parse_var(&lookup, RANDOM_LEN_VAR, "a non-negative integer")?
            .unwrap_or(defaults.random_len);
        let random_max = parse_var(&lookup, RANDOM_MAX_VAR, "a positive integer")?
            .unwrap_or(defaults.random_max);
        let stack_capacity = parse_var(&lookup, STACK_CAPACITY_VAR, "a positive integer")?
            .unwrap_or(defaults.stack_capacity);

        if random_max <= 0 {
            return Err(invalid(RANDOM_MAX_VAR, random_max, "a positive integer"));
        }

        if stack_capacity == 0 {
            return Err(invalid(STACK_CAPACITY_VAR, stack_capacity, "a positive integer"));
        }

        Ok(Self {
            seed,
            random_len,
            random_max,
            stack_capacity,
        })
    }

    /// The configured seed, or a fresh one. Either way it is logged so a run can be replayed.
    pub fn seed_or_random(&self) -> u64 {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        info!(seed, "set {}={} to reproduce this input", SEED_VAR, seed);
        seed
    }
}

/// Settings from the environment, parsed on first use.
pub fn settings() -> Result<&'static Settings, ConfigError> {
    static SETTINGS: OnceCell<Settings> = OnceCell::new();
    SETTINGS.get_or_try_init(Settings::from_env)
}

fn parse_var<V: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<V>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::Invalid {
                var,
                value,
                expected,
            }),
        },
    }
}

fn invalid(var: &'static str, value: impl ToString, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Settings::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(from_pairs(&[]), Ok(Settings::default()));
    }

    #[test]
    fn reads_every_variable() {
        let settings = from_pairs(&[
            (SEED_VAR, "42"),
            (RANDOM_LEN_VAR, "12"),
            (RANDOM_MAX_VAR, " 50 "),
            (STACK_CAPACITY_VAR, "5"),
        ])
        .unwrap();

        assert_eq!(
            settings,
            Settings {
                seed: Some(42),
                random_len: 12,
                random_max: 50,
                stack_capacity: 5,
            }
        );
        assert_eq!(settings.seed_or_random(), 42);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = from_pairs(&[(SEED_VAR, "soon")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "SORT_TRACE_SEED must be an unsigned 64-bit integer, got \"soon\""
        );

        assert!(from_pairs(&[(RANDOM_MAX_VAR, "0")]).is_err());
        assert!(from_pairs(&[(RANDOM_MAX_VAR, "-3")]).is_err());
        assert!(from_pairs(&[(STACK_CAPACITY_VAR, "0")]).is_err());
    }
}
