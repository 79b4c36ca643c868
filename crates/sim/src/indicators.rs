//! Turn-signal, hazard, and headlight state with a shared blink phase.
//!
//! The blink generator is a fixed-frequency square wave: the phase flips every
//! [`BLINK_INTERVAL_S`], regardless of which signal is active. Whether a given
//! lamp is lit is derived from the enabled flags and the shared phase.

use serde::{Deserialize, Serialize};

/// Time between blink phase flips, in seconds (3 Hz toggle, 1.5 Hz blink).
pub const BLINK_INTERVAL_S: f64 = 1.0 / 3.0;

/// State of the signal stalk, hazard switch, and headlights.
///
/// `left_enabled` and `right_enabled` are mutually exclusive. Hazard is
/// independent of both and, while active, blinks both side lamps in phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorState {
    pub left_enabled: bool,
    pub right_enabled: bool,
    pub hazard_enabled: bool,
    pub headlight_on: bool,

    /// Shared blink phase for every lamp.
    pub blink_on: bool,

    /// Time accumulated since the last phase flip, in seconds.
    pub blink_elapsed: f64,
}

impl IndicatorState {
    /// Flips the left signal, cancelling the right signal when it turns on.
    pub fn toggle_left(&mut self) {
        self.left_enabled = !self.left_enabled;
        if self.left_enabled {
            self.right_enabled = false;
            self.restart_blink(true);
        }
    }

    /// Flips the right signal, cancelling the left signal when it turns on.
    pub fn toggle_right(&mut self) {
        self.right_enabled = !self.right_enabled;
        if self.right_enabled {
            self.left_enabled = false;
            self.restart_blink(true);
        }
    }

    /// Flips the hazard switch.
    ///
    /// The blink phase restarts lit when hazard turns on and dark when it turns
    /// off. The side signal flags are left untouched.
    pub fn toggle_hazard(&mut self) {
        self.hazard_enabled = !self.hazard_enabled;
        self.restart_blink(self.hazard_enabled);
    }

    /// Flips the headlights.
    pub fn toggle_headlight(&mut self) {
        self.headlight_on = !self.headlight_on;
    }

    /// Advances the blink phase by `dt` seconds.
    ///
    /// Every whole interval elapsed flips the phase once; the remainder carries
    /// over to the next call. Runs in constant time for any `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.blink_elapsed += dt;
        if self.blink_elapsed < BLINK_INTERVAL_S {
            return;
        }

        let remainder = self.blink_elapsed.rem_euclid(BLINK_INTERVAL_S);
        let flips = ((self.blink_elapsed - remainder) / BLINK_INTERVAL_S).round();
        if flips % 2.0 == 1.0 {
            self.blink_on = !self.blink_on;
        }
        self.blink_elapsed = remainder;
    }

    /// Returns `true` if the left lamp is lit in the current phase.
    #[must_use]
    pub fn left_lamp_lit(&self) -> bool {
        (self.hazard_enabled || self.left_enabled) && self.blink_on
    }

    /// Returns `true` if the right lamp is lit in the current phase.
    #[must_use]
    pub fn right_lamp_lit(&self) -> bool {
        (self.hazard_enabled || self.right_enabled) && self.blink_on
    }

    /// Returns `true` if the hazard tell-tale is lit in the current phase.
    #[must_use]
    pub fn hazard_lamp_lit(&self) -> bool {
        self.hazard_enabled && self.blink_on
    }

    fn restart_blink(&mut self, lit: bool) {
        self.blink_on = lit;
        self.blink_elapsed = 0.0;
    }
}
