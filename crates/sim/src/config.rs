//! Simulation configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! power-on state and the standard frame pacing. A full file looks like:
//!
//! ```toml
//! [initial]
//! velocity_kmh = 0.0
//! fuel_pct = 100.0
//! cabin_temp_c = 28.0
//! outside_temp_c = 28.0
//! setpoint_c = 22.0
//! fan_level = 3
//! airflow = "face"
//!
//! [pacing]
//! max_step_s = 0.05
//! fallback_step_s = 0.016666666666666666
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use cockpit_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    dynamics::{PERCENT_MAX, VELOCITY_MAX_KMH, rpm_for},
    hvac::{
        Airflow, CABIN_TEMP_MAX_C, CABIN_TEMP_MIN_C, FAN_LEVEL_MAX, FAN_LEVEL_MIN, HvacState,
        normalize_setpoint,
    },
    numeric::{clamp_int, clamp_range},
    pacing::{DEFAULT_FALLBACK_STEP_S, DEFAULT_MAX_STEP_S, FramePacer},
    state::SimulationState,
};

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub initial: InitialConditions,
    pub pacing: PacingConfig,
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] for values that fail validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`SimulationConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial.validate()?;
        self.pacing.pacer()?;
        Ok(())
    }
}

/// Conditions the vehicle starts in.
///
/// Values outside their documented ranges are clamped when the state is built,
/// matching how the running simulation treats out-of-range inputs. Only values
/// that cannot be clamped (NaN) are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConditions {
    pub velocity_kmh: f64,
    pub fuel_pct: f64,
    pub cabin_temp_c: f64,
    pub outside_temp_c: f64,
    pub setpoint_c: f64,
    pub fan_level: i32,
    pub airflow: Airflow,
}

impl Default for InitialConditions {
    fn default() -> Self {
        let state = SimulationState::default();
        Self {
            velocity_kmh: state.velocity_kmh,
            fuel_pct: state.fuel_pct,
            cabin_temp_c: state.hvac.cabin_temp_c,
            outside_temp_c: state.hvac.outside_temp_c,
            setpoint_c: state.hvac.setpoint_c,
            fan_level: state.hvac.fan_level,
            airflow: state.hvac.airflow_mode,
        }
    }
}

impl InitialConditions {
    /// Rejects values that are not numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first NaN field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("initial.velocity_kmh", self.velocity_kmh),
            ("initial.fuel_pct", self.fuel_pct),
            ("initial.cabin_temp_c", self.cabin_temp_c),
            ("initial.outside_temp_c", self.outside_temp_c),
            ("initial.setpoint_c", self.setpoint_c),
        ];

        match fields.into_iter().find(|(_, value)| value.is_nan()) {
            Some((field, _)) => Err(ConfigError::Invalid {
                field,
                source: ConstraintError::NotANumber,
            }),
            None => Ok(()),
        }
    }

    /// Builds the starting state, clamping every value into range.
    #[must_use]
    pub fn to_state(&self) -> SimulationState {
        let velocity_kmh = clamp_range(self.velocity_kmh, 0.0, VELOCITY_MAX_KMH);

        SimulationState {
            velocity_kmh,
            rpm: rpm_for(velocity_kmh),
            fuel_pct: clamp_range(self.fuel_pct, 0.0, PERCENT_MAX),
            hvac: HvacState {
                airflow_mode: self.airflow,
                fan_level: clamp_int(self.fan_level, FAN_LEVEL_MIN, FAN_LEVEL_MAX),
                setpoint_c: normalize_setpoint(self.setpoint_c),
                cabin_temp_c: clamp_range(self.cabin_temp_c, CABIN_TEMP_MIN_C, CABIN_TEMP_MAX_C),
                outside_temp_c: self.outside_temp_c,
                ..HvacState::default()
            },
            ..SimulationState::default()
        }
    }
}

/// Bounds applied to measured frame deltas by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingConfig {
    pub max_step_s: f64,
    pub fallback_step_s: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            max_step_s: DEFAULT_MAX_STEP_S,
            fallback_step_s: DEFAULT_FALLBACK_STEP_S,
        }
    }
}

impl PacingConfig {
    /// Builds the frame pacer described by this section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if either step is not strictly positive.
    pub fn pacer(&self) -> Result<FramePacer, ConfigError> {
        let max_step = strictly_positive("pacing.max_step_s", self.max_step_s)?;
        let fallback_step = strictly_positive("pacing.fallback_step_s", self.fallback_step_s)?;
        Ok(FramePacer::from_constrained(max_step, fallback_step))
    }
}

fn strictly_positive(
    field: &'static str,
    value: f64,
) -> Result<Constrained<f64, StrictlyPositive>, ConfigError> {
    Constrained::new(value).map_err(|source| ConfigError::Invalid { field, source })
}
