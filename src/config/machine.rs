use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// User-facing configuration for the slot machine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Directory the symbol images are resolved against
    pub assets_dir: PathBuf,
    /// One image per symbol, in symbol index order
    pub symbol_files: Vec<String>,
    /// Initial value of the cycles control
    pub default_cycles: u32,
    pub min_cycles: u32,
    pub max_cycles: u32,
    /// Reel speed in symbols per second
    pub spin_speed: f32,
    /// Animation timer period
    pub tick_interval_ms: u32,
}

impl MachineConfig {
    pub const DEFAULT_CYCLES: u32 = 10;
    pub const DEFAULT_MIN_CYCLES: u32 = 1;
    pub const DEFAULT_MAX_CYCLES: u32 = 100;
    pub const DEFAULT_SPIN_SPEED: f32 = 20.0;
    pub const DEFAULT_TICK_INTERVAL_MS: u32 = 16;

    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that cannot be sanitized into something sensible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol_files.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.min_cycles > self.max_cycles {
            return Err(ConfigError::CycleRange {
                min: self.min_cycles,
                max: self.max_cycles,
            });
        }
        if !self.spin_speed.is_finite() || self.spin_speed <= 0.0 {
            return Err(ConfigError::InvalidSpinSpeed(self.spin_speed));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_files.len()
    }

    /// Clamps a requested cycle count into the configured bounds
    pub fn sanitize_cycles(&self, value: u32) -> u32 {
        value.clamp(self.min_cycles, self.max_cycles.max(self.min_cycles))
    }

    /// The default cycle count, clamped into bounds
    pub fn initial_cycles(&self) -> u32 {
        self.sanitize_cycles(self.default_cycles)
    }

    /// Full paths of the symbol images
    #[cfg_attr(not(windows), allow(dead_code))]
    pub fn symbol_paths(&self) -> Vec<PathBuf> {
        self.symbol_files
            .iter()
            .map(|file| self.assets_dir.join(file))
            .collect()
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("."),
            symbol_files: (1..=4).map(|n| format!("symbol{n}.png")).collect(),
            default_cycles: Self::DEFAULT_CYCLES,
            min_cycles: Self::DEFAULT_MIN_CYCLES,
            max_cycles: Self::DEFAULT_MAX_CYCLES,
            spin_speed: Self::DEFAULT_SPIN_SPEED,
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("At least one symbol image must be configured")]
    NoSymbols,
    #[error("Minimum cycles {min} exceeds maximum cycles {max}")]
    CycleRange { min: u32, max: u32 },
    #[error("Spin speed must be a positive number, got {0}")]
    InvalidSpinSpeed(f32),
    #[error("Tick interval must be at least 1 ms")]
    InvalidTickInterval,
}
