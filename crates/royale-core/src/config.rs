//! Match configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Loaded configs are validated before use.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading or validating a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("population must be between 1 and {MAX_POPULATION}, got {0}")]
    InvalidPopulation(u32),
    #[error("max_dt must be a positive finite number of seconds, got {0}")]
    InvalidMaxDt(f32),
    #[error("world half size must be at least {min}, got {got}")]
    WorldTooSmall { min: f32, got: f32 },
}

/// Obstacle layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub half_size: f32,
    pub building_count: u32,
    pub crate_count: u32,
    pub spawn_clear_radius: f32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            half_size: WORLD_HALF_SIZE,
            building_count: DEFAULT_BUILDING_COUNT,
            crate_count: DEFAULT_CRATE_COUNT,
            spawn_clear_radius: SPAWN_CLEAR_RADIUS,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same match.
    pub seed: u64,
    /// Combatants at match start, counting the player.
    pub population: u32,
    /// Largest step accepted by `update`; longer steps are clamped.
    pub max_dt: f32,
    /// Run the background attrition rule.
    pub attrition: bool,
    pub world: WorldGenConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            population: DEFAULT_POPULATION,
            max_dt: DEFAULT_MAX_DT,
            attrition: true,
            world: WorldGenConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 || self.population > MAX_POPULATION {
            return Err(ConfigError::InvalidPopulation(self.population));
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(ConfigError::InvalidMaxDt(self.max_dt));
        }
        let min_half_size = MIN_AGENT_SPAWN_DISTANCE + SPAWN_FALLBACK_INSET * 2.0;
        if !(self.world.half_size >= min_half_size) {
            return Err(ConfigError::WorldTooSmall {
                min: min_half_size,
                got: self.world.half_size,
            });
        }
        Ok(())
    }
}
