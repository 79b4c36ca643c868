//! Climate-control panel state and its manual button actions.

use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_range, snap_to_half};

/// Lowest fan level (fan off).
pub const FAN_LEVEL_MIN: i32 = 0;

/// Highest fan level.
pub const FAN_LEVEL_MAX: i32 = 7;

/// Lowest selectable setpoint, in °C.
pub const SETPOINT_MIN_C: f64 = 16.0;

/// Highest selectable setpoint, in °C.
pub const SETPOINT_MAX_C: f64 = 30.0;

/// Coldest cabin temperature the thermal model allows, in °C.
pub const CABIN_TEMP_MIN_C: f64 = -20.0;

/// Hottest cabin temperature the thermal model allows, in °C.
pub const CABIN_TEMP_MAX_C: f64 = 60.0;

/// Where conditioned air is directed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Airflow {
    #[default]
    Face,
    BiLevel,
    Foot,
}

impl Airflow {
    /// Returns the next mode in panel order: face, bi-level, foot, face.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Airflow::Face => Airflow::BiLevel,
            Airflow::BiLevel => Airflow::Foot,
            Airflow::Foot => Airflow::Face,
        }
    }
}

/// State of the climate-control panel and the cabin it conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvacState {
    pub ac_on: bool,
    pub auto_mode: bool,
    pub recirculation_on: bool,
    pub defrost_on: bool,
    pub airflow_mode: Airflow,

    /// Fan level in `[0, 7]`, where 0 is off.
    pub fan_level: i32,

    /// Target cabin temperature in `[16, 30]` °C, always a multiple of 0.5.
    pub setpoint_c: f64,

    /// Cabin air temperature in `[-20, 60]` °C.
    pub cabin_temp_c: f64,

    /// Ambient temperature outside the vehicle, in °C.
    pub outside_temp_c: f64,

    /// Simulated time since start, used by the engine warmup latch.
    pub warmup_elapsed_s: f64,

    /// Continuous time the engine has spent above the warmup RPM threshold.
    pub rpm_hot_s: f64,

    /// Latched once the engine reaches operating temperature.
    pub engine_warm: bool,
}

impl Default for HvacState {
    fn default() -> Self {
        Self {
            ac_on: false,
            auto_mode: false,
            recirculation_on: false,
            defrost_on: false,
            airflow_mode: Airflow::Face,
            fan_level: 3,
            setpoint_c: snap_to_half(22.0),
            cabin_temp_c: 28.0,
            outside_temp_c: 28.0,
            warmup_elapsed_s: 0.0,
            rpm_hot_s: 0.0,
            engine_warm: false,
        }
    }
}

impl HvacState {
    pub fn toggle_ac(&mut self) {
        self.ac_on = !self.ac_on;
    }

    pub fn toggle_recirc(&mut self) {
        self.recirculation_on = !self.recirculation_on;
    }

    pub fn toggle_defrost(&mut self) {
        self.defrost_on = !self.defrost_on;
    }

    /// Flips auto mode.
    ///
    /// Entering auto mode with the fan off starts it at level 1 immediately.
    pub fn toggle_auto(&mut self) {
        self.auto_mode = !self.auto_mode;
        if self.auto_mode && self.fan_level == FAN_LEVEL_MIN {
            self.fan_level = 1;
        }
    }

    /// Advances the fan one level, wrapping from 7 back to off.
    ///
    /// This is a manual override and always leaves auto mode.
    pub fn cycle_fan(&mut self) {
        self.auto_mode = false;
        self.fan_level = (self.fan_level + 1).rem_euclid(FAN_LEVEL_MAX + 1);
    }

    /// Advances the airflow mode. This also leaves auto mode.
    pub fn cycle_airflow(&mut self) {
        self.auto_mode = false;
        self.airflow_mode = self.airflow_mode.next();
    }

    /// Moves the setpoint by `delta_c` and snaps it onto the 0.5 °C grid.
    pub fn adjust_setpoint(&mut self, delta_c: f64) {
        self.setpoint_c = normalize_setpoint(self.setpoint_c + delta_c);
    }
}

/// Clamps a setpoint into range and snaps it to the nearest 0.5 °C.
///
/// Halves round up, so 22.25 becomes 22.5.
#[must_use]
pub fn normalize_setpoint(setpoint_c: f64) -> f64 {
    let clamped = clamp_range(setpoint_c, SETPOINT_MIN_C, SETPOINT_MAX_C);
    clamp_range(snap_to_half(clamped), SETPOINT_MIN_C, SETPOINT_MAX_C)
}
