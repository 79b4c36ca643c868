use serde::{Deserialize, Serialize};

use crate::{dynamics::RPM_IDLE, hvac::HvacState, indicators::IndicatorState};

/// The complete simulated vehicle, as read by a presentation layer.
///
/// Ranges listed on each field hold after every action and every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Road speed in `[0, 200]` km/h.
    pub velocity_kmh: f64,

    /// Throttle pedal in `[0, 100]` percent.
    pub throttle_pct: f64,

    /// Brake pedal in `[0, 100]` percent.
    pub brake_pct: f64,

    /// Engine speed in `[800, 7000]` RPM, derived from road speed.
    pub rpm: f64,

    /// Fuel remaining in `[0, 100]` percent.
    pub fuel_pct: f64,

    /// Total simulated time, in seconds.
    pub runtime_s: f64,

    pub indicators: IndicatorState,
    pub hvac: HvacState,
}

impl Default for SimulationState {
    /// Power-on state: parked at idle with a full tank and a 28 °C cabin.
    fn default() -> Self {
        Self {
            velocity_kmh: 0.0,
            throttle_pct: 0.0,
            brake_pct: 0.0,
            rpm: RPM_IDLE,
            fuel_pct: 100.0,
            runtime_s: 0.0,
            indicators: IndicatorState::default(),
            hvac: HvacState::default(),
        }
    }
}
