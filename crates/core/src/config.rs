//! Session configuration
//!
//! Everything a session needs is fixed at creation time. A configuration is
//! validated once, before any state is built; a malformed one is fatal to
//! session creation.
//!
//! # Environment Variables
//!
//! [`GameConfig::from_env`] reads:
//!
//! - `BLOCKFALL_DIFFICULTY`: gravity rate, ticks every `1000 / difficulty` ms (default: 1)
//! - `BLOCKFALL_WIDTH` / `BLOCKFALL_HEIGHT`: grid size (default: 10 x 22)
//! - `BLOCKFALL_QUEUE_LENGTH`: number of upcoming pieces (default: 4)
//! - `BLOCKFALL_SEED`: pool shuffle seed (default: 1)
//! - `BLOCKFALL_FROZEN_TOP_ROWS`: rows never written by a row collapse (default: 2, 0 lets every row collapse)
//! - `BLOCKFALL_POOL_WRAP`: "legacy" skips the last pool entry, "full" cycles through all (default: legacy)
//! - `BLOCKFALL_HOLD_ONCE`: "0"/"false" allows repeated holds before a lock (default: on)
//! - `BLOCKFALL_INITIAL_DELAY_MS`: delay before the first gravity tick (default: 1000)

use std::env;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::generator::PoolWrap;
use crate::types::{
    BASE_GRAVITY_MS, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_QUEUE_LENGTH, INITIAL_GRAVITY_DELAY_MS,
    LEGACY_FROZEN_TOP_ROWS, MAX_BOARD_DIM, MAX_DIFFICULTY,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("difficulty must be between 1 and {max}, got {value}")]
    Difficulty { value: u32, max: u32 },

    #[error("grid size {width}x{height} is invalid (each side must be 1..={max})")]
    Dimensions { width: u16, height: u16, max: u16 },

    #[error("queue length must be at least 1")]
    QueueLength,

    #[error("frozen_top_rows ({frozen}) must be smaller than the grid height ({height})")]
    FrozenRows { frozen: u16, height: u16 },

    #[error("command buffer must hold at least one command")]
    CommandBuffer,

    #[error("piece pool must contain at least one shape")]
    EmptyPool,

    #[error("invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gravity rate; a tick fires every `1000 / difficulty` ms
    pub difficulty: u32,
    pub width: u16,
    pub height: u16,
    /// Number of upcoming pieces kept in the queue
    pub queue_length: usize,
    /// Seed for the one-time pool shuffle
    pub seed: u32,
    /// Top rows a row collapse never writes into (see `Grid::collapse_row`)
    pub frozen_top_rows: u16,
    /// Where the piece generator restarts its pool
    pub pool_wrap: PoolWrap,
    /// Refuse a second hold until the active piece locks
    pub hold_once_per_lock: bool,
    /// Delay before the first gravity tick
    pub initial_delay_ms: u64,
    /// Capacity of the session's inbound command channel
    pub command_buffer: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: 1,
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            queue_length: DEFAULT_QUEUE_LENGTH,
            seed: 1,
            frozen_top_rows: LEGACY_FROZEN_TOP_ROWS,
            pool_wrap: PoolWrap::Legacy,
            hold_once_per_lock: true,
            initial_delay_ms: INITIAL_GRAVITY_DELAY_MS,
            command_buffer: 32,
        }
    }
}

impl GameConfig {
    /// Build from `BLOCKFALL_*` environment variables on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = env_parse("BLOCKFALL_DIFFICULTY")? {
            config.difficulty = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_WIDTH")? {
            config.width = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_HEIGHT")? {
            config.height = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_QUEUE_LENGTH")? {
            config.queue_length = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_SEED")? {
            config.seed = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_FROZEN_TOP_ROWS")? {
            config.frozen_top_rows = v;
        }
        if let Ok(raw) = env::var("BLOCKFALL_POOL_WRAP") {
            if !raw.trim().is_empty() {
                config.pool_wrap = PoolWrap::from_str(&raw).ok_or_else(|| ConfigError::Env {
                    key: "BLOCKFALL_POOL_WRAP",
                    value: raw,
                })?;
            }
        }
        if let Some(v) = env_flag("BLOCKFALL_HOLD_ONCE")? {
            config.hold_once_per_lock = v;
        }
        if let Some(v) = env_parse("BLOCKFALL_INITIAL_DELAY_MS")? {
            config.initial_delay_ms = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::Difficulty {
                value: self.difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        let dim_ok = |d: u16| (1..=MAX_BOARD_DIM).contains(&d);
        if !dim_ok(self.width) || !dim_ok(self.height) {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_DIM,
            });
        }
        if self.queue_length == 0 {
            return Err(ConfigError::QueueLength);
        }
        if self.frozen_top_rows >= self.height {
            return Err(ConfigError::FrozenRows {
                frozen: self.frozen_top_rows,
                height: self.height,
            });
        }
        if self.command_buffer == 0 {
            return Err(ConfigError::CommandBuffer);
        }
        Ok(())
    }

    /// Period between gravity ticks
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis((BASE_GRAVITY_MS / self.difficulty.max(1)) as u64)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Anchor where new pieces appear: (width / 2, 0)
    pub fn spawn_point(&self) -> (i16, i16) {
        ((self.width / 2) as i16, 0)
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Env { key, value: raw })
        }
        Err(_) => Ok(None),
    }
}

fn env_flag(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::Env { key, value: raw }),
        },
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (10, 22));
        assert_eq!(config.queue_length, 4);
        assert_eq!(config.spawn_point(), (5, 0));
        assert_eq!(config.gravity_interval(), Duration::from_millis(1000));
        assert_eq!(config.initial_delay(), Duration::from_secs(1));
        assert_eq!(config.frozen_top_rows, 2);
        assert_eq!(config.pool_wrap, PoolWrap::Legacy);
    }

    #[test]
    fn test_gravity_interval_scales_with_difficulty() {
        let config = GameConfig {
            difficulty: 4,
            ..GameConfig::default()
        };
        assert_eq!(config.gravity_interval(), Duration::from_millis(250));

        let config = GameConfig {
            difficulty: 3,
            ..GameConfig::default()
        };
        assert_eq!(config.gravity_interval(), Duration::from_millis(333));
    }

    #[test]
    fn test_malformed_configs_rejected() {
        let base = GameConfig::default();

        let c = GameConfig { difficulty: 0, ..base.clone() };
        assert!(matches!(c.validate(), Err(ConfigError::Difficulty { .. })));

        let c = GameConfig { difficulty: 1001, ..base.clone() };
        assert!(matches!(c.validate(), Err(ConfigError::Difficulty { .. })));

        let c = GameConfig { width: 0, ..base.clone() };
        assert!(matches!(c.validate(), Err(ConfigError::Dimensions { .. })));

        let c = GameConfig { height: 0, ..base.clone() };
        assert!(matches!(c.validate(), Err(ConfigError::Dimensions { .. })));

        let c = GameConfig { queue_length: 0, ..base.clone() };
        assert_eq!(c.validate(), Err(ConfigError::QueueLength));

        let c = GameConfig { frozen_top_rows: 22, ..base.clone() };
        assert!(matches!(c.validate(), Err(ConfigError::FrozenRows { .. })));

        let c = GameConfig { command_buffer: 0, ..base };
        assert_eq!(c.validate(), Err(ConfigError::CommandBuffer));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: GameConfig =
            serde_json::from_str(r#"{"difficulty": 5, "queue_length": 2}"#).unwrap();
        assert_eq!(config.difficulty, 5);
        assert_eq!(config.queue_length, 2);
        assert_eq!(config.width, 10);
        assert!(config.hold_once_per_lock);
        assert_eq!(config.frozen_top_rows, 2);

        let config: GameConfig = serde_json::from_str(r#"{"pool_wrap": "full"}"#).unwrap();
        assert_eq!(config.pool_wrap, PoolWrap::Full);
    }

    // The only test in this crate that touches the process environment
    #[test]
    fn test_from_env_overrides_and_rejects() {
        const KEYS: [&str; 9] = [
            "BLOCKFALL_DIFFICULTY",
            "BLOCKFALL_WIDTH",
            "BLOCKFALL_HEIGHT",
            "BLOCKFALL_QUEUE_LENGTH",
            "BLOCKFALL_SEED",
            "BLOCKFALL_FROZEN_TOP_ROWS",
            "BLOCKFALL_POOL_WRAP",
            "BLOCKFALL_HOLD_ONCE",
            "BLOCKFALL_INITIAL_DELAY_MS",
        ];
        let clear = || KEYS.iter().for_each(|k| env::remove_var(k));

        clear();
        assert_eq!(GameConfig::from_env().unwrap(), GameConfig::default());

        env::set_var("BLOCKFALL_DIFFICULTY", " 4 ");
        env::set_var("BLOCKFALL_WIDTH", "12");
        env::set_var("BLOCKFALL_FROZEN_TOP_ROWS", "0");
        env::set_var("BLOCKFALL_POOL_WRAP", "Full");
        env::set_var("BLOCKFALL_HOLD_ONCE", "off");
        env::set_var("BLOCKFALL_SEED", "");
        let config = GameConfig::from_env().unwrap();
        assert_eq!(config.difficulty, 4);
        assert_eq!(config.width, 12);
        assert_eq!(config.frozen_top_rows, 0);
        assert_eq!(config.pool_wrap, PoolWrap::Full);
        assert!(!config.hold_once_per_lock);
        assert_eq!(config.seed, 1);

        env::set_var("BLOCKFALL_HEIGHT", "tall");
        assert_eq!(
            GameConfig::from_env(),
            Err(ConfigError::Env {
                key: "BLOCKFALL_HEIGHT",
                value: "tall".to_string()
            })
        );
        env::remove_var("BLOCKFALL_HEIGHT");

        env::set_var("BLOCKFALL_HOLD_ONCE", "maybe");
        assert!(matches!(
            GameConfig::from_env(),
            Err(ConfigError::Env { key: "BLOCKFALL_HOLD_ONCE", .. })
        ));
        env::set_var("BLOCKFALL_HOLD_ONCE", "1");

        env::set_var("BLOCKFALL_POOL_WRAP", "bag");
        assert!(matches!(
            GameConfig::from_env(),
            Err(ConfigError::Env { key: "BLOCKFALL_POOL_WRAP", .. })
        ));
        env::remove_var("BLOCKFALL_POOL_WRAP");

        // Parsed values still go through validation
        env::set_var("BLOCKFALL_DIFFICULTY", "0");
        assert!(matches!(
            GameConfig::from_env(),
            Err(ConfigError::Difficulty { value: 0, .. })
        ));

        clear();
    }
}
