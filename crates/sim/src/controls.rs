//! Translation of physical key transitions into simulation actions.
//!
//! Toggle-style controls act only on a fresh press and ignore keyboard
//! auto-repeat. Throttle keys act on every press including repeats. The brake
//! is held: pressed while down, released on up.

use serde::Deserialize;

use crate::Simulation;

/// Throttle change per throttle key event, in percent.
pub const THROTTLE_STEP_PCT: f64 = 5.0;

/// Setpoint change per setpoint key press, in °C.
pub const SETPOINT_STEP_C: f64 = 0.5;

/// A control on the simulated dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Hazard,
    Headlight,
    ThrottleUp,
    ThrottleDown,
    Brake,
    Ac,
    Fan,
    Recirc,
    Defrost,
    Auto,
    Airflow,
    SetpointUp,
    SetpointDown,
}

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    #[default]
    Down,
    Up,
}

/// A single key transition as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub transition: Transition,

    /// Set when a `Down` was generated by keyboard auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    /// A fresh (non-repeat) key press.
    #[must_use]
    pub fn press(key: Key) -> Self {
        Self {
            key,
            transition: Transition::Down,
            repeat: false,
        }
    }

    /// An auto-repeated key press.
    #[must_use]
    pub fn repeat(key: Key) -> Self {
        Self {
            repeat: true,
            ..Self::press(key)
        }
    }

    /// A key release.
    #[must_use]
    pub fn release(key: Key) -> Self {
        Self {
            transition: Transition::Up,
            ..Self::press(key)
        }
    }

    fn is_fresh_press(&self) -> bool {
        self.transition == Transition::Down && !self.repeat
    }
}

/// Forwards a key transition to the matching simulation action, if any.
pub fn handle_key(sim: &mut Simulation, event: KeyEvent) {
    let is_down = event.transition == Transition::Down;

    match event.key {
        Key::ThrottleUp if is_down => sim.adjust_throttle(THROTTLE_STEP_PCT),
        Key::ThrottleDown if is_down => sim.adjust_throttle(-THROTTLE_STEP_PCT),
        Key::Brake => sim.apply_brake(is_down),
        _ if !event.is_fresh_press() => {}
        Key::Left => sim.toggle_left(),
        Key::Right => sim.toggle_right(),
        Key::Hazard => sim.toggle_hazard(),
        Key::Headlight => sim.toggle_headlight(),
        Key::Ac => sim.toggle_ac(),
        Key::Fan => sim.cycle_fan(),
        Key::Recirc => sim.toggle_recirc(),
        Key::Defrost => sim.toggle_defrost(),
        Key::Auto => sim.toggle_auto(),
        Key::Airflow => sim.cycle_airflow(),
        Key::SetpointUp => sim.adjust_setpoint(SETPOINT_STEP_C),
        Key::SetpointDown => sim.adjust_setpoint(-SETPOINT_STEP_C),
        Key::ThrottleUp | Key::ThrottleDown => {}
    }
}
