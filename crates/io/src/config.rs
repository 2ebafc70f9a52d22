//! Environment configuration shared by the `statemat` binary.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `STATEMAT_PRECISION` | decimals in rendered tables (max 12) | 2 |
//! | `STATEMAT_SEED` | seed for random samples | OS entropy |
//! | `STATEMAT_MAX_CHANNELS` | widest sample accepted | `MAX_CHANNELS` |
//! | `STATEMAT_BIT_LABELS` | label rows/columns with bit strings | off |

use statemat_core::MAX_CHANNELS;

use crate::error::IoError;

pub const DEFAULT_PRECISION: usize = 2;
pub const MAX_PRECISION: usize = 12;

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub precision: usize,
    pub seed: Option<u64>,
    pub max_channels: usize,
    pub bit_labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            seed: None,
            max_channels: MAX_CHANNELS,
            bit_labels: false,
        }
    }
}

impl Config {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, IoError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through an arbitrary lookup; unset variables keep their defaults,
    /// unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup("STATEMAT_PRECISION") {
            config.precision = parse_setting::<usize>("STATEMAT_PRECISION", &v)?.min(MAX_PRECISION);
        }
        if let Some(v) = lookup("STATEMAT_SEED") {
            config.seed = Some(parse_setting("STATEMAT_SEED", &v)?);
        }
        if let Some(v) = lookup("STATEMAT_MAX_CHANNELS") {
            config.max_channels = parse_setting::<usize>("STATEMAT_MAX_CHANNELS", &v)?.min(MAX_CHANNELS);
        }
        if let Some(v) = lookup("STATEMAT_BIT_LABELS") {
            config.bit_labels = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(IoError::InvalidSetting {
                        name: "STATEMAT_BIT_LABELS",
                        value: v,
                    })
                }
            };
        }

        Ok(config)
    }
}

pub(crate) fn parse_setting<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, IoError> {
    value.trim().parse().map_err(|_| IoError::InvalidSetting {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let c = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.precision, 2);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn test_overrides_and_caps() {
        let c = Config::from_lookup(lookup(&[
            ("STATEMAT_PRECISION", "40"),
            ("STATEMAT_SEED", " 99 "),
            ("STATEMAT_MAX_CHANNELS", "4"),
            ("STATEMAT_BIT_LABELS", "Yes"),
        ]))
        .unwrap();
        assert_eq!(c.precision, MAX_PRECISION);
        assert_eq!(c.seed, Some(99));
        assert_eq!(c.max_channels, 4);
        assert!(c.bit_labels);

        let c = Config::from_lookup(lookup(&[("STATEMAT_MAX_CHANNELS", "64")])).unwrap();
        assert_eq!(c.max_channels, MAX_CHANNELS);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("STATEMAT_SEED", "abc")])),
            Err(IoError::InvalidSetting {
                name: "STATEMAT_SEED",
                ..
            })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("STATEMAT_BIT_LABELS", "maybe")])),
            Err(IoError::InvalidSetting { .. })
        ));
    }
}
