use tracing::debug;

use crate::{
    config::{ConfigError, SimulationConfig},
    dynamics::{self, PERCENT_MAX},
    numeric::clamp_range,
    pacing::FramePacer,
    state::SimulationState,
    thermal::{self, HeatFlows},
    warmup,
};

/// Owns the simulated vehicle and drives every sub-model.
///
/// Operator actions mutate the state synchronously. [`Simulation::tick`]
/// advances continuous time in a fixed order:
///
/// 1. indicators (blink phase)
/// 2. vehicle dynamics (speed, RPM, fuel)
/// 3. engine warmup, which needs this tick's RPM
/// 4. climate law and cabin thermal model, which need this tick's warmup state
///
/// No operation can fail; inputs outside their ranges are clamped.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    pacer: FramePacer,
    heat_flows: HeatFlows,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a simulation in the power-on state.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(SimulationState::default())
    }

    /// Creates a simulation from configured initial conditions and pacing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.initial.validate()?;
        Ok(Self {
            pacer: config.pacing.pacer()?,
            ..Self::from_state(config.initial.to_state())
        })
    }

    /// Creates a simulation that starts from an explicit state.
    ///
    /// The state is taken as given. Pedal positions and fan level are clamped
    /// on the next tick; other fields are the caller's responsibility.
    #[must_use]
    pub fn from_state(state: SimulationState) -> Self {
        Self {
            state,
            pacer: FramePacer::default(),
            heat_flows: HeatFlows::default(),
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Heat flows evaluated during the most recent tick.
    #[must_use]
    pub fn heat_flows(&self) -> HeatFlows {
        self.heat_flows
    }

    #[must_use]
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Advances simulated time by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` is treated as zero: every pass still
    /// runs, but nothing is integrated.
    pub fn tick(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let state = &mut self.state;

        state.runtime_s += dt;
        state.indicators.advance(dt);
        dynamics::advance(state, dt);
        warmup::advance(&mut state.hvac, dt, state.rpm);
        self.heat_flows = thermal::advance(&mut state.hvac, dt);
    }

    /// Advances simulated time by a measured frame delta, bounded by the pacer.
    ///
    /// Returns the step actually simulated.
    pub fn tick_paced(&mut self, measured_dt: f64) -> f64 {
        let dt = self.pacer.pace(measured_dt);
        self.tick(dt);
        dt
    }

    pub fn toggle_left(&mut self) {
        self.state.indicators.toggle_left();
        debug!(enabled = self.state.indicators.left_enabled, "left signal");
    }

    pub fn toggle_right(&mut self) {
        self.state.indicators.toggle_right();
        debug!(enabled = self.state.indicators.right_enabled, "right signal");
    }

    pub fn toggle_hazard(&mut self) {
        self.state.indicators.toggle_hazard();
        debug!(enabled = self.state.indicators.hazard_enabled, "hazard");
    }

    pub fn toggle_headlight(&mut self) {
        self.state.indicators.toggle_headlight();
        debug!(on = self.state.indicators.headlight_on, "headlight");
    }

    /// Moves the throttle by `delta_pct`, clamped to `[0, 100]`.
    pub fn adjust_throttle(&mut self, delta_pct: f64) {
        self.state.throttle_pct = clamp_range(self.state.throttle_pct + delta_pct, 0.0, PERCENT_MAX);
        debug!(throttle_pct = self.state.throttle_pct, "throttle");
    }

    /// Sets the brake fully on while pressed and fully off when released.
    pub fn apply_brake(&mut self, pressed: bool) {
        self.state.brake_pct = if pressed { PERCENT_MAX } else { 0.0 };
        debug!(pressed, "brake");
    }

    pub fn toggle_ac(&mut self) {
        self.state.hvac.toggle_ac();
        debug!(on = self.state.hvac.ac_on, "ac");
    }

    pub fn toggle_recirc(&mut self) {
        self.state.hvac.toggle_recirc();
        debug!(on = self.state.hvac.recirculation_on, "recirculation");
    }

    pub fn toggle_defrost(&mut self) {
        self.state.hvac.toggle_defrost();
        debug!(on = self.state.hvac.defrost_on, "defrost");
    }

    /// Flips auto climate; a stopped fan starts at level 1 on entry.
    pub fn toggle_auto(&mut self) {
        self.state.hvac.toggle_auto();
        debug!(
            on = self.state.hvac.auto_mode,
            fan_level = self.state.hvac.fan_level,
            "auto climate"
        );
    }

    /// Steps the fan level, wrapping 7 to off, and leaves auto mode.
    pub fn cycle_fan(&mut self) {
        self.state.hvac.cycle_fan();
        debug!(fan_level = self.state.hvac.fan_level, "fan");
    }

    /// Steps the airflow mode and leaves auto mode.
    pub fn cycle_airflow(&mut self) {
        self.state.hvac.cycle_airflow();
        debug!(airflow = ?self.state.hvac.airflow_mode, "airflow");
    }

    /// Moves the setpoint by `delta_c`, clamped to `[16, 30]` and snapped to 0.5 °C.
    pub fn adjust_setpoint(&mut self, delta_c: f64) {
        self.state.hvac.adjust_setpoint(delta_c);
        debug!(setpoint_c = self.state.hvac.setpoint_c, "setpoint");
    }
}
