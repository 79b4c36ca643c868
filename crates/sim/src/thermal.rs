//! Cabin thermal model.
//!
//! Cabin temperature is integrated with forward Euler from three terms, each
//! expressed as a rate of temperature change in °C/s:
//!
//! - cooling by the AC, proportional to fan speed and the error above setpoint
//! - heating from engine coolant, proportional to fan speed and the error below
//!   setpoint, and much weaker while the engine is cold
//! - leakage toward the outside temperature, halved while recirculating
//!
//! Explicit integration is only stable for small steps; hosts bound `dt` with
//! a [`FramePacer`](crate::FramePacer).

use std::convert::Infallible;

use cockpit_core::{Model, StepIntegrable};
use serde::Serialize;
use tracing::trace;

use crate::{
    climate,
    hvac::{CABIN_TEMP_MAX_C, CABIN_TEMP_MIN_C, FAN_LEVEL_MAX, FAN_LEVEL_MIN, HvacState},
    numeric::{clamp_int, clamp_range},
};

/// AC cooling gain per °C of error at full fan.
pub const COOLING_GAIN: f64 = 2.5;

/// Heater gain per °C of error at full fan with a warm engine.
pub const HEATER_GAIN_WARM: f64 = 3.0;

/// Heater gain per °C of error at full fan with a cold engine.
pub const HEATER_GAIN_COLD: f64 = 0.6;

/// Fraction of the outside-cabin difference leaking in per second.
pub const LEAK_RATE: f64 = 0.15;

/// Cooling boost while recirculating cabin air.
pub const RECIRC_COOLING_GAIN: f64 = 1.2;

/// Leak reduction while recirculating cabin air.
pub const RECIRC_LEAK_FACTOR: f64 = 0.5;

/// Instantaneous heat-transfer terms, as rates of cabin temperature change.
///
/// All fields are non-negative except `leak`, which is positive when the
/// outside air is warmer than the cabin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeatFlows {
    /// Cooling by the AC, in °C/s.
    pub cooling: f64,

    /// Heating by the heater core, in °C/s.
    pub heating: f64,

    /// Exchange with outside air, in °C/s.
    pub leak: f64,
}

impl HeatFlows {
    /// Evaluates the heat-transfer terms for the given panel and cabin state.
    #[must_use]
    pub fn evaluate(hvac: &HvacState) -> Self {
        let fan_ratio = if hvac.fan_level <= 0 {
            0.0
        } else {
            f64::from(hvac.fan_level) / f64::from(FAN_LEVEL_MAX)
        };
        let (recirc_gain, leak_factor) = if hvac.recirculation_on {
            (RECIRC_COOLING_GAIN, RECIRC_LEAK_FACTOR)
        } else {
            (1.0, 1.0)
        };
        let delta = hvac.cabin_temp_c - hvac.setpoint_c;

        let cooling = if hvac.ac_on && delta > 0.0 {
            COOLING_GAIN * fan_ratio * recirc_gain * delta
        } else {
            0.0
        };

        let heating = if delta < 0.0 {
            let heater_gain = if hvac.engine_warm {
                HEATER_GAIN_WARM
            } else {
                HEATER_GAIN_COLD
            };
            heater_gain * fan_ratio * (-delta)
        } else {
            0.0
        };

        let leak = LEAK_RATE * (hvac.outside_temp_c - hvac.cabin_temp_c) * leak_factor;

        Self {
            cooling,
            heating,
            leak,
        }
    }

    /// Net rate of cabin temperature change, in °C/s.
    #[must_use]
    pub fn net(&self) -> f64 {
        -self.cooling + self.heating + self.leak
    }
}

/// The cabin thermal law as a [`Model`] from panel state to heat flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalModel;

impl Model for ThermalModel {
    type Input = HvacState;
    type Output = HeatFlows;
    type Error = Infallible;

    fn call(&self, input: &HvacState) -> Result<HeatFlows, Infallible> {
        Ok(HeatFlows::evaluate(input))
    }
}

/// Cabin air temperature in °C, stepped by its rate of change in °C/s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CabinTemperature(pub f64);

impl StepIntegrable<f64> for CabinTemperature {
    type Derivative = f64;

    fn step(&self, derivative: f64, dt: f64) -> Self {
        CabinTemperature(self.0 + dt * derivative)
    }
}

/// Advances the climate system by `dt` seconds.
///
/// The fan level is clamped first, then the auto-climate law runs so that its
/// targets apply to this step, then cabin temperature is integrated and
/// clamped to `[-20, 60]` °C.
///
/// Returns the heat flows used for the step.
pub fn advance(hvac: &mut HvacState, dt: f64) -> HeatFlows {
    hvac.fan_level = clamp_int(hvac.fan_level, FAN_LEVEL_MIN, FAN_LEVEL_MAX);
    climate::apply(hvac);

    let Ok(flows) = ThermalModel.call(hvac);
    let CabinTemperature(next) = CabinTemperature(hvac.cabin_temp_c).step(flows.net(), dt);
    hvac.cabin_temp_c = clamp_range(next, CABIN_TEMP_MIN_C, CABIN_TEMP_MAX_C);

    trace!(
        cooling = flows.cooling,
        heating = flows.heating,
        leak = flows.leak,
        cabin_c = hvac.cabin_temp_c,
        "thermal step"
    );

    flows
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::hvac::Airflow;

    #[test]
    fn equilibrium_holds_temperature() {
        let mut hvac = HvacState {
            cabin_temp_c: 22.0,
            outside_temp_c: 22.0,
            ..HvacState::default()
        };

        let flows = advance(&mut hvac, 1.0);
        assert_eq!(flows, HeatFlows::default());
        assert_eq!(hvac.cabin_temp_c, 22.0);
    }

    #[test]
    fn ac_at_full_fan_cools_hot_cabin() {
        let hvac = HvacState {
            ac_on: true,
            fan_level: 7,
            cabin_temp_c: 30.0,
            outside_temp_c: 28.0,
            ..HvacState::default()
        };

        let flows = ThermalModel.call(&hvac).unwrap();
        assert_relative_eq!(flows.cooling, 20.0);
        assert_eq!(flows.heating, 0.0);
        assert_relative_eq!(flows.leak, -0.3);
        assert_relative_eq!(flows.net(), -20.3);
    }

    #[test]
    fn recirculation_boosts_cooling_and_halves_leak() {
        let hvac = HvacState {
            ac_on: true,
            recirculation_on: true,
            fan_level: 7,
            cabin_temp_c: 30.0,
            outside_temp_c: 40.0,
            ..HvacState::default()
        };

        let flows = HeatFlows::evaluate(&hvac);
        assert_relative_eq!(flows.cooling, 24.0);
        assert_relative_eq!(flows.leak, 0.75);
    }

    #[test]
    fn ac_does_not_cool_below_setpoint() {
        let hvac = HvacState {
            ac_on: true,
            cabin_temp_c: 20.0,
            outside_temp_c: 20.0,
            ..HvacState::default()
        };

        assert_eq!(HeatFlows::evaluate(&hvac).cooling, 0.0);
    }

    #[test]
    fn cold_engine_heats_weakly() {
        let cold = HvacState {
            fan_level: 7,
            cabin_temp_c: 12.0,
            outside_temp_c: 12.0,
            ..HvacState::default()
        };
        let warm = HvacState {
            engine_warm: true,
            ..cold
        };

        assert_relative_eq!(HeatFlows::evaluate(&cold).heating, 6.0);
        assert_relative_eq!(HeatFlows::evaluate(&warm).heating, 30.0);
    }

    #[test]
    fn fan_off_disables_cooling_and_heating() {
        let hvac = HvacState {
            ac_on: true,
            fan_level: 0,
            cabin_temp_c: 35.0,
            outside_temp_c: 35.0,
            ..HvacState::default()
        };

        assert_eq!(HeatFlows::evaluate(&hvac), HeatFlows::default());
    }

    #[test]
    fn out_of_range_fan_is_clamped_before_use() {
        let mut hvac = HvacState {
            fan_level: 12,
            ..HvacState::default()
        };
        advance(&mut hvac, 0.0);
        assert_eq!(hvac.fan_level, 7);

        hvac.fan_level = -3;
        advance(&mut hvac, 0.0);
        assert_eq!(hvac.fan_level, 0);
    }

    #[test]
    fn auto_targets_apply_within_the_same_step() {
        let mut hvac = HvacState {
            auto_mode: true,
            fan_level: 1,
            cabin_temp_c: 30.0,
            outside_temp_c: 30.0,
            ..HvacState::default()
        };

        let flows = advance(&mut hvac, 0.01);
        assert!(hvac.ac_on);
        assert_eq!(hvac.fan_level, 7);
        assert_eq!(hvac.airflow_mode, Airflow::Face);
        assert_relative_eq!(flows.cooling, 20.0);
        assert_relative_eq!(hvac.cabin_temp_c, 29.8);
    }

    #[test]
    fn advance_steps_by_the_model_net_rate() {
        let mut hvac = HvacState {
            ac_on: true,
            recirculation_on: true,
            fan_level: 5,
            cabin_temp_c: 31.0,
            outside_temp_c: 35.0,
            ..HvacState::default()
        };
        let expected = ThermalModel.call(&hvac).unwrap();

        let flows = advance(&mut hvac, 0.02);
        assert_eq!(flows, expected);
        assert_relative_eq!(hvac.cabin_temp_c, 31.0 + 0.02 * expected.net());
    }

    #[test]
    fn cabin_temperature_is_clamped() {
        let mut hvac = HvacState {
            ac_on: true,
            fan_level: 7,
            setpoint_c: 16.0,
            cabin_temp_c: 60.0,
            outside_temp_c: 60.0,
            ..HvacState::default()
        };

        advance(&mut hvac, 10.0);
        assert_eq!(hvac.cabin_temp_c, CABIN_TEMP_MIN_C);
    }
}
