//! Linear drivetrain model: speed from pedals, RPM from speed, fuel from throttle.
//!
//! RPM has no inertia of its own; it is a pure function of road speed and is
//! recomputed after every speed update.

use std::convert::Infallible;

use cockpit_core::{Model, StepIntegrable};
use tracing::trace;

use crate::{numeric::clamp_range, state::SimulationState};

/// Top speed, in km/h.
pub const VELOCITY_MAX_KMH: f64 = 200.0;

/// Idle engine speed, in RPM.
pub const RPM_IDLE: f64 = 800.0;

/// Engine speed limit, in RPM.
pub const RPM_MAX: f64 = 7000.0;

/// RPM added per km/h of road speed.
pub const RPM_PER_KMH: f64 = 60.0;

/// Upper bound for throttle, brake, and fuel percentages.
pub const PERCENT_MAX: f64 = 100.0;

/// Acceleration per percent of throttle, before scaling.
const THROTTLE_GAIN: f64 = 0.05;

/// Constant rolling drag, before scaling.
const DRAG: f64 = 0.04;

/// Deceleration per percent of brake, before scaling.
const BRAKE_GAIN: f64 = 0.15;

/// Scale from the pedal balance to km/h per second.
const ACCEL_SCALE: f64 = 100.0;

/// Fuel burned per percent of throttle, in percent of tank per second.
const FUEL_BURN_PER_THROTTLE: f64 = 0.002;

/// Pedal positions driving the drivetrain.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInputs {
    /// Throttle in `[0, 100]` percent.
    pub throttle_pct: f64,

    /// Brake in `[0, 100]` percent.
    pub brake_pct: f64,
}

/// Rates of change produced by the drivetrain for given pedal positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveRates {
    /// Change in road speed, in km/h per second.
    pub acceleration_kmh_s: f64,

    /// Fuel consumption, in percent of tank per second.
    pub fuel_burn_pct_s: f64,
}

impl DriveRates {
    /// Evaluates the linear pedal law.
    #[must_use]
    pub fn evaluate(inputs: &DriveInputs) -> Self {
        let DriveInputs {
            throttle_pct,
            brake_pct,
        } = *inputs;

        Self {
            acceleration_kmh_s: (THROTTLE_GAIN * throttle_pct - DRAG - BRAKE_GAIN * brake_pct)
                * ACCEL_SCALE,
            fuel_burn_pct_s: FUEL_BURN_PER_THROTTLE * throttle_pct,
        }
    }
}

/// The drivetrain law as a [`Model`] from pedal positions to rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicsModel;

impl Model for DynamicsModel {
    type Input = DriveInputs;
    type Output = DriveRates;
    type Error = Infallible;

    fn call(&self, input: &DriveInputs) -> Result<DriveRates, Infallible> {
        Ok(DriveRates::evaluate(input))
    }
}

/// Road speed in km/h, stepped by acceleration in km/h per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Velocity(pub f64);

impl StepIntegrable<f64> for Velocity {
    type Derivative = f64;

    fn step(&self, derivative: f64, dt: f64) -> Self {
        Velocity(self.0 + derivative * dt)
    }
}

/// Fuel level in percent, stepped by burn rate in percent per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FuelLevel(pub f64);

impl StepIntegrable<f64> for FuelLevel {
    type Derivative = f64;

    fn step(&self, burn_rate: f64, dt: f64) -> Self {
        FuelLevel(self.0 - burn_rate * dt)
    }
}

/// Engine speed implied by a road speed.
#[must_use]
pub fn rpm_for(velocity_kmh: f64) -> f64 {
    clamp_range(RPM_IDLE + velocity_kmh * RPM_PER_KMH, RPM_IDLE, RPM_MAX)
}

/// Advances the drivetrain by `dt` seconds.
///
/// Pedal positions are re-clamped into range before use.
pub fn advance(state: &mut SimulationState, dt: f64) {
    state.throttle_pct = clamp_range(state.throttle_pct, 0.0, PERCENT_MAX);
    state.brake_pct = clamp_range(state.brake_pct, 0.0, PERCENT_MAX);

    let Ok(rates) = DynamicsModel.call(&DriveInputs {
        throttle_pct: state.throttle_pct,
        brake_pct: state.brake_pct,
    });

    let Velocity(velocity) = Velocity(state.velocity_kmh).step(rates.acceleration_kmh_s, dt);
    state.velocity_kmh = clamp_range(velocity, 0.0, VELOCITY_MAX_KMH);
    state.rpm = rpm_for(state.velocity_kmh);

    let FuelLevel(fuel) = FuelLevel(state.fuel_pct).step(rates.fuel_burn_pct_s, dt);
    state.fuel_pct = clamp_range(fuel, 0.0, PERCENT_MAX);

    trace!(
        velocity_kmh = state.velocity_kmh,
        rpm = state.rpm,
        fuel_pct = state.fuel_pct,
        "drivetrain step"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn idle_coasts_down_to_a_stop() {
        let rates = DynamicsModel.call(&DriveInputs::default()).unwrap();
        assert_relative_eq!(rates.acceleration_kmh_s, -4.0);
        assert_eq!(rates.fuel_burn_pct_s, 0.0);

        let mut state = SimulationState::default();
        advance(&mut state, 1.0);
        assert_eq!(state.velocity_kmh, 0.0);
        assert_eq!(state.rpm, RPM_IDLE);
    }

    #[test]
    fn throttle_accelerates_and_burns_fuel() {
        let mut state = SimulationState {
            throttle_pct: 10.0,
            ..SimulationState::default()
        };

        advance(&mut state, 0.1);
        // (0.05 * 10 - 0.04) * 100 * 0.1 = 4.6 km/h
        assert_relative_eq!(state.velocity_kmh, 4.6, epsilon = 1e-9);
        assert_relative_eq!(state.rpm, 800.0 + 4.6 * 60.0, epsilon = 1e-6);
        assert_relative_eq!(state.fuel_pct, 100.0 - 0.002, epsilon = 1e-12);
    }

    #[test]
    fn advance_integrates_the_model_rates() {
        let inputs = DriveInputs {
            throttle_pct: 35.0,
            brake_pct: 0.0,
        };
        let rates = DynamicsModel.call(&inputs).unwrap();
        let mut state = SimulationState {
            throttle_pct: inputs.throttle_pct,
            velocity_kmh: 40.0,
            ..SimulationState::default()
        };

        advance(&mut state, 0.05);
        assert_relative_eq!(state.velocity_kmh, 40.0 + 0.05 * rates.acceleration_kmh_s);
        assert_relative_eq!(state.fuel_pct, 100.0 - 0.05 * rates.fuel_burn_pct_s);
        assert_relative_eq!(state.rpm, rpm_for(state.velocity_kmh));
    }

    #[test]
    fn brake_overpowers_full_throttle() {
        let rates = DriveRates::evaluate(&DriveInputs {
            throttle_pct: 100.0,
            brake_pct: 100.0,
        });
        assert!(rates.acceleration_kmh_s < 0.0);
    }

    #[test]
    fn speed_and_rpm_saturate() {
        let mut state = SimulationState {
            throttle_pct: 100.0,
            ..SimulationState::default()
        };

        advance(&mut state, 5.0);
        assert_eq!(state.velocity_kmh, VELOCITY_MAX_KMH);
        assert_eq!(state.rpm, RPM_MAX);
    }

    #[test]
    fn out_of_range_pedals_are_clamped() {
        let mut state = SimulationState {
            throttle_pct: 140.0,
            brake_pct: -20.0,
            ..SimulationState::default()
        };

        advance(&mut state, 0.0);
        assert_eq!(state.throttle_pct, 100.0);
        assert_eq!(state.brake_pct, 0.0);
    }

    #[test]
    fn fuel_never_goes_negative() {
        let mut state = SimulationState {
            throttle_pct: 100.0,
            fuel_pct: 0.1,
            ..SimulationState::default()
        };

        advance(&mut state, 1.0);
        assert_eq!(state.fuel_pct, 0.0);
    }

    #[test]
    fn rpm_tracks_speed() {
        assert_eq!(rpm_for(0.0), RPM_IDLE);
        assert_eq!(rpm_for(50.0), 3800.0);
        assert_eq!(rpm_for(150.0), RPM_MAX);
    }
}
