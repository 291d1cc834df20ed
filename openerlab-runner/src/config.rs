//! Serializable simulation configuration.
//!
//! ```toml
//! [simulation]
//! sample_size = 500
//! seed = 42
//! parallel = true
//! strategies = ["opener_first", "starter_first"]
//!
//! [roster]
//! pitchers = "pitcher_pcts.csv"
//! hitters = "hitter_pcts.csv"
//! ```
//!
//! Every `[simulation]` key is optional. Relative roster paths resolve against
//! the directory containing the config file.

use std::path::{Path, PathBuf};

use openerlab_core::engine::Strategy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runner::BatchConfig;

/// Unique identifier for a configuration (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("sample_size must be at least 1")]
    ZeroSampleSize,

    #[error("at least one strategy must be selected")]
    NoStrategies,

    #[error("no roster files configured (set [roster] or pass them explicitly)")]
    MissingRoster,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub roster: Option<RosterPaths>,
}

/// Monte Carlo parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationSection {
    /// Games simulated per strategy.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Master seed for the per-trial RNG hierarchy.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Run trials on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            seed: default_seed(),
            parallel: default_parallel(),
            strategies: default_strategies(),
        }
    }
}

fn default_sample_size() -> usize {
    500
}

fn default_seed() -> u64 {
    42
}

fn default_parallel() -> bool {
    true
}

fn default_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

/// Locations of the two roster CSV files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterPaths {
    pub pitchers: PathBuf,
    pub hitters: PathBuf,
}

impl SimulationConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, resolving relative roster paths against its directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let (Some(roster), Some(base)) = (config.roster.as_mut(), path.parent()) {
            roster.pitchers = resolve(base, &roster.pitchers);
            roster.hitters = resolve(base, &roster.hitters);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        if self.simulation.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        Ok(())
    }

    pub fn roster_paths(&self) -> Result<&RosterPaths, ConfigError> {
        self.roster.as_ref().ok_or(ConfigError::MissingRoster)
    }

    pub fn batch(&self) -> BatchConfig {
        BatchConfig {
            trials: self.simulation.sample_size,
            seed: self.simulation.seed,
            parallel: self.simulation.parallel,
        }
    }

    /// Deterministic hash of this configuration, used to name artifacts.
    pub fn run_id(&self) -> RunId {
        let sim = &self.simulation;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(sim.sample_size as u64).to_le_bytes());
        hasher.update(&sim.seed.to_le_bytes());
        hasher.update(&[u8::from(sim.parallel)]);
        for strategy in &sim.strategies {
            hasher.update(strategy.label().as_bytes());
            hasher.update(b"\0");
        }
        if let Some(roster) = &self.roster {
            hasher.update(roster.pitchers.to_string_lossy().as_bytes());
            hasher.update(b"\0");
            hasher.update(roster.hitters.to_string_lossy().as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
