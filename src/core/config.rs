//! Engine configuration with documented constants
//!
//! All tuning numbers used by the runtime and the metrics estimator live
//! here. A config is built by the caller and handed to
//! [`Engine::with_config`](crate::engine::Engine::with_config).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{NutmegError, Result};

/// Configuration for the engine runtime and its metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === STORAGE ===
    /// Maximum number of bytes kept for scene and object names
    ///
    /// Longer names are truncated on a character boundary.
    pub max_name_len: usize,

    /// Capacity reserved the first time a growable list needs room
    ///
    /// After that, capacity doubles whenever the list is full.
    pub min_capacity: usize,

    // === METRICS ===
    /// Memory budget the RAM meter is measured against (MiB)
    pub ram_budget_mib: f32,

    /// How fast the synthetic GPU oscillation advances per simulated second
    pub gpu_phase_rate: f32,

    /// Fraction of the CPU percentage fed into the GPU signal
    pub gpu_cpu_weight: f32,

    /// Half the peak-to-peak size of the GPU oscillation (percentage points)
    ///
    /// The oscillation term is `(sin(phase) + 1) * amplitude`, so it spans
    /// `[0, 2 * amplitude]`.
    pub gpu_oscillation_amplitude: f32,

    /// Weight of the previous GPU value in its moving average
    ///
    /// At 0.5 the reported value is the mean of last and new.
    pub gpu_smoothing: f32,

    // === METER HISTORY ===
    /// Number of samples kept per meter channel
    pub meter_history_len: usize,

    /// Blend factor for the smoothed meter value
    pub meter_smoothing: f32,

    /// Blend factor applied to the history slot being overwritten
    pub meter_history_smoothing: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_name_len: 63,
            min_capacity: 4,

            ram_budget_mib: 256.0,
            gpu_phase_rate: 0.8,
            gpu_cpu_weight: 0.6,
            gpu_oscillation_amplitude: 15.0,
            gpu_smoothing: 0.5,

            meter_history_len: 120,
            meter_smoothing: 0.18,
            meter_history_smoothing: 0.12,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_name_len == 0 {
            return Err(NutmegError::InvalidConfig(
                "max_name_len must be at least 1".into(),
            ));
        }

        if self.min_capacity == 0 {
            return Err(NutmegError::InvalidConfig(
                "min_capacity must be at least 1".into(),
            ));
        }

        if !(self.ram_budget_mib > 0.0) {
            return Err(NutmegError::InvalidConfig(format!(
                "ram_budget_mib ({}) must be positive",
                self.ram_budget_mib
            )));
        }

        let unit_fractions = [
            ("gpu_smoothing", self.gpu_smoothing),
            ("meter_smoothing", self.meter_smoothing),
            ("meter_history_smoothing", self.meter_history_smoothing),
        ];
        for (name, value) in unit_fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(NutmegError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if self.meter_history_len == 0 {
            return Err(NutmegError::InvalidConfig(
                "meter_history_len must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// RAM budget in bytes
    pub fn ram_budget_bytes(&self) -> f64 {
        self.ram_budget_mib as f64 * 1024.0 * 1024.0
    }
}
