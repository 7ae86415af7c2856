use std::{env::var, time::Duration};

use crate::error::{Result, UnoError};

pub const SEED_VAR: &str = "RUNO_SEED";
pub const CPU_DELAY_VAR: &str = "RUNO_CPU_DELAY_MS";
pub const AUTOPLAY_VAR: &str = "RUNO_AUTOPLAY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Fixes every shuffle and every computer decision when set.
    pub seed: Option<u64>,
    /// Pause before each computer turn so a person can follow along.
    pub cpu_delay: Duration,
    /// Seat 0 is played by the computer too.
    pub autoplay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            cpu_delay: Duration::ZERO,
            autoplay: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(SEED_VAR) {
            config.seed = Some(parse(SEED_VAR, value)?);
        }

        if let Some(value) = lookup(CPU_DELAY_VAR) {
            config.cpu_delay = Duration::from_millis(parse(CPU_DELAY_VAR, value)?);
        }

        if let Some(value) = lookup(AUTOPLAY_VAR) {
            config.autoplay = match value.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(UnoError::InvalidConfig {
                        key: AUTOPLAY_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| UnoError::InvalidConfig { key, value })
}
