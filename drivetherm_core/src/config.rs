//! TOML configuration for the thermal manager.
//!
//! All parameters carry defaults matching the identified drive, so an empty
//! TOML document (or [`ThermalConfig::default`]) yields the production
//! schedule. Loading validates parameter bounds before any component is
//! constructed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plant::{NUM_INPUTS, NUM_OUTPUTS, NUM_STATES};

// ─── Defaults ───────────────────────────────────────────────────────

/// Default estimator sub-step [s].
pub const ESTIMATOR_STEP_DEFAULT: f32 = 0.1;
/// Default sub-steps per coarse service period (1 s at 0.1 s each).
pub const ESTIMATOR_PERIOD_COUNTS_DEFAULT: u32 = 10;
/// Default ambient temperature [°C].
pub const AMBIENT_TEMP_DEFAULT: f32 = 20.0;
/// Default predictor step [s].
pub const PREDICTOR_STEP_DEFAULT: f32 = 1.0;
/// Default predictive horizon length [steps].
pub const PREDICTOR_PERIOD_COUNTS_DEFAULT: u32 = 60;
/// Default leading overload segment length [steps].
pub const PREDICTOR_OVERLOAD_COUNTS_DEFAULT: u32 = 10;
/// Default protective limits relative to ambient [°C]:
/// winding, housing, board, junction.
pub const MAX_TEMP_THRESHOLDS_DEFAULT: [f32; NUM_OUTPUTS] = [60.0, 40.0, 40.0, 60.0];
/// Default overload-segment heat inputs [W].
pub const OVERLOAD_INPUTS_DEFAULT: [f32; NUM_INPUTS] = [5.4168, 23.0400, 5.5027];
/// Default rated-segment heat inputs [W].
pub const RATED_INPUTS_DEFAULT: [f32; NUM_INPUTS] = [5.4168, 16.0000, 4.4368];

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("config I/O error: {0}")]
    Io(String),
    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Parameter validation error.
    #[error("config validation: {0}")]
    Validation(String),
}

// ─── Config Sections ────────────────────────────────────────────────

/// Thermal estimator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Integration sub-step [s].
    #[serde(default = "default_estimator_step")]
    pub step_size: f32,
    /// Sub-steps per coarse service period.
    #[serde(default = "default_estimator_period_counts")]
    pub period_counts: u32,
    /// Ambient temperature [°C].
    #[serde(default = "default_ambient_temp")]
    pub ambient_temp: f32,
    /// Initial thermal state, relative to ambient [°C].
    #[serde(default = "zero_state")]
    pub initial_state: [f32; NUM_STATES],
}

/// Overload predictor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Integration step [s].
    #[serde(default = "default_predictor_step")]
    pub step_size: f32,
    /// Predictive horizon length [steps].
    #[serde(default = "default_predictor_period_counts")]
    pub period_counts: u32,
    /// Leading steps driven at the overload input level.
    #[serde(default = "default_predictor_overload_counts")]
    pub overload_counts: u32,
    /// Ambient temperature the thresholds are referenced to [°C].
    #[serde(default = "default_ambient_temp")]
    pub ambient_temp: f32,
    /// Protective limits relative to ambient [°C].
    #[serde(default = "default_thresholds")]
    pub max_temp_thresholds: [f32; NUM_OUTPUTS],
    /// Heat inputs during the overload segment [W].
    #[serde(default = "default_overload_inputs")]
    pub overload_inputs: [f32; NUM_INPUTS],
    /// Heat inputs during the rated segment [W].
    #[serde(default = "default_rated_inputs")]
    pub rated_inputs: [f32; NUM_INPUTS],
    /// Keep peaks across sweeps instead of resetting them per sweep.
    #[serde(default)]
    pub lifetime_peaks: bool,
}

/// Complete thermal manager configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThermalConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub predictor: PredictorConfig,
}

fn default_estimator_step() -> f32 {
    ESTIMATOR_STEP_DEFAULT
}
fn default_estimator_period_counts() -> u32 {
    ESTIMATOR_PERIOD_COUNTS_DEFAULT
}
fn default_ambient_temp() -> f32 {
    AMBIENT_TEMP_DEFAULT
}
fn zero_state() -> [f32; NUM_STATES] {
    [0.0; NUM_STATES]
}
fn default_predictor_step() -> f32 {
    PREDICTOR_STEP_DEFAULT
}
fn default_predictor_period_counts() -> u32 {
    PREDICTOR_PERIOD_COUNTS_DEFAULT
}
fn default_predictor_overload_counts() -> u32 {
    PREDICTOR_OVERLOAD_COUNTS_DEFAULT
}
fn default_thresholds() -> [f32; NUM_OUTPUTS] {
    MAX_TEMP_THRESHOLDS_DEFAULT
}
fn default_overload_inputs() -> [f32; NUM_INPUTS] {
    OVERLOAD_INPUTS_DEFAULT
}
fn default_rated_inputs() -> [f32; NUM_INPUTS] {
    RATED_INPUTS_DEFAULT
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            step_size: ESTIMATOR_STEP_DEFAULT,
            period_counts: ESTIMATOR_PERIOD_COUNTS_DEFAULT,
            ambient_temp: AMBIENT_TEMP_DEFAULT,
            initial_state: [0.0; NUM_STATES],
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            step_size: PREDICTOR_STEP_DEFAULT,
            period_counts: PREDICTOR_PERIOD_COUNTS_DEFAULT,
            overload_counts: PREDICTOR_OVERLOAD_COUNTS_DEFAULT,
            ambient_temp: AMBIENT_TEMP_DEFAULT,
            max_temp_thresholds: MAX_TEMP_THRESHOLDS_DEFAULT,
            overload_inputs: OVERLOAD_INPUTS_DEFAULT,
            rated_inputs: RATED_INPUTS_DEFAULT,
            lifetime_peaks: false,
        }
    }
}

// ─── Loading & Validation ───────────────────────────────────────────

impl ThermalConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_step_size("estimator.step_size", self.estimator.step_size)?;
        validate_counts("estimator.period_counts", self.estimator.period_counts)?;
        validate_finite_slice("estimator.initial_state", &self.estimator.initial_state)?;
        if !self.estimator.ambient_temp.is_finite() {
            return Err(ConfigError::Validation(format!(
                "estimator.ambient_temp {} is not finite",
                self.estimator.ambient_temp
            )));
        }

        let p = &self.predictor;
        validate_step_size("predictor.step_size", p.step_size)?;
        validate_counts("predictor.period_counts", p.period_counts)?;
        if p.overload_counts > p.period_counts {
            return Err(ConfigError::Validation(format!(
                "predictor.overload_counts {} exceeds period_counts {}",
                p.overload_counts, p.period_counts
            )));
        }
        if !p.ambient_temp.is_finite() {
            return Err(ConfigError::Validation(format!(
                "predictor.ambient_temp {} is not finite",
                p.ambient_temp
            )));
        }
        validate_finite_slice("predictor.max_temp_thresholds", &p.max_temp_thresholds)?;
        validate_finite_slice("predictor.overload_inputs", &p.overload_inputs)?;
        validate_finite_slice("predictor.rated_inputs", &p.rated_inputs)?;

        Ok(())
    }
}

fn validate_step_size(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{name} {value} must be positive and finite"
        )));
    }
    Ok(())
}

fn validate_counts(name: &str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!("{name} must be at least 1")));
    }
    Ok(())
}

fn validate_finite_slice(name: &str, values: &[f32]) -> Result<(), ConfigError> {
    for (i, v) in values.iter().enumerate() {
        if !v.is_finite() {
            return Err(ConfigError::Validation(format!(
                "{name}[{i}] {v} is not finite"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_production_defaults() {
        let config = ThermalConfig::from_toml("").unwrap();
        assert_eq!(config, ThermalConfig::default());
        assert_eq!(config.estimator.step_size, 0.1);
        assert_eq!(config.estimator.period_counts, 10);
        assert_eq!(config.predictor.period_counts, 60);
        assert_eq!(config.predictor.overload_counts, 10);
        assert_eq!(config.predictor.max_temp_thresholds, [60.0, 40.0, 40.0, 60.0]);
        assert!(!config.predictor.lifetime_peaks);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = ThermalConfig::from_toml(
            r#"
[predictor]
overload_counts = 5
max_temp_thresholds = [50.0, 35.0, 35.0, 55.0]
"#,
        )
        .unwrap();
        assert_eq!(config.predictor.overload_counts, 5);
        assert_eq!(config.predictor.max_temp_thresholds, [50.0, 35.0, 35.0, 55.0]);
        assert_eq!(config.predictor.period_counts, 60);
        assert_eq!(config.estimator, EstimatorConfig::default());
    }

    #[test]
    fn reject_zero_step_size() {
        let err = ThermalConfig::from_toml("[estimator]\nstep_size = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("estimator.step_size"), "got: {err}");
    }

    #[test]
    fn reject_negative_predictor_step() {
        let err = ThermalConfig::from_toml("[predictor]\nstep_size = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("predictor.step_size"), "got: {err}");
    }

    #[test]
    fn reject_zero_period_counts() {
        let err = ThermalConfig::from_toml("[estimator]\nperiod_counts = 0\n").unwrap_err();
        assert!(err.to_string().contains("period_counts"), "got: {err}");
    }

    #[test]
    fn reject_overload_segment_longer_than_horizon() {
        let err = ThermalConfig::from_toml("[predictor]\noverload_counts = 61\n").unwrap_err();
        assert!(err.to_string().contains("overload_counts"), "got: {err}");
    }

    #[test]
    fn reject_malformed_toml() {
        let err = ThermalConfig::from_toml("not valid toml @@@").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert!(err.to_string().contains("bad value"));
    }
}
