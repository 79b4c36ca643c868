//! Auto-climate control law.
//!
//! While auto mode is active, the panel's AC, fan, airflow, and defrost
//! settings are derived from the cabin-vs-setpoint error every tick. Manual
//! settings for those controls are overwritten.

use tracing::info;

use crate::{
    hvac::{Airflow, HvacState},
    numeric::{clamp_int, round_half_up},
};

/// Error above which auto mode switches the AC on, in °C.
pub const AC_ON_ABOVE_C: f64 = 0.5;

/// Error below which auto mode switches the AC off, in °C.
pub const AC_OFF_BELOW_C: f64 = -1.0;

/// Error magnitude at which airflow leaves bi-level, in °C.
pub const AIRFLOW_BAND_C: f64 = 0.5;

/// Error at or below which defrost is engaged, in °C.
pub const DEFROST_AT_OR_BELOW_C: f64 = -2.0;

/// Fan level with zero temperature error.
const FAN_BASE: f64 = 2.0;

/// Additional fan level per °C of error.
const FAN_PER_DEGREE: f64 = 3.0;

/// Targets the control law assigns for a given temperature error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateTargets {
    /// `Some` when the error is outside the AC hysteresis band.
    pub ac_on: Option<bool>,
    pub fan_level: i32,
    pub airflow_mode: Airflow,
    pub defrost_on: bool,
}

/// Computes the targets for `delta = cabin - setpoint`.
///
/// Exactly ±0.5 °C selects face and foot respectively, with face checked first.
#[must_use]
pub fn targets(delta: f64) -> ClimateTargets {
    let ac_on = if delta > AC_ON_ABOVE_C {
        Some(true)
    } else if delta < AC_OFF_BELOW_C {
        Some(false)
    } else {
        None
    };

    let fan_raw = FAN_BASE + FAN_PER_DEGREE * delta.abs();
    let fan_level = clamp_int(round_half_up(fan_raw) as i32, 1, 7);

    let airflow_mode = if delta >= AIRFLOW_BAND_C {
        Airflow::Face
    } else if delta <= -AIRFLOW_BAND_C {
        Airflow::Foot
    } else {
        Airflow::BiLevel
    };

    ClimateTargets {
        ac_on,
        fan_level,
        airflow_mode,
        defrost_on: delta <= DEFROST_AT_OR_BELOW_C,
    }
}

/// Applies the control law to `hvac`. Does nothing unless auto mode is active.
pub fn apply(hvac: &mut HvacState) {
    if !hvac.auto_mode {
        return;
    }

    let ClimateTargets {
        ac_on,
        fan_level,
        airflow_mode,
        defrost_on,
    } = targets(hvac.cabin_temp_c - hvac.setpoint_c);

    if let Some(ac_on) = ac_on {
        if ac_on != hvac.ac_on {
            info!(
                ac_on,
                cabin_c = hvac.cabin_temp_c,
                setpoint_c = hvac.setpoint_c,
                "auto climate switched AC"
            );
        }
        hvac.ac_on = ac_on;
    }
    hvac.fan_level = fan_level;
    hvac.airflow_mode = airflow_mode;
    hvac.defrost_on = defrost_on;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_hvac(cabin_temp_c: f64) -> HvacState {
        HvacState {
            auto_mode: true,
            cabin_temp_c,
            setpoint_c: 22.0,
            ..HvacState::default()
        }
    }

    #[test]
    fn manual_mode_is_left_alone() {
        let mut hvac = HvacState {
            cabin_temp_c: 35.0,
            defrost_on: true,
            ..HvacState::default()
        };
        let before = hvac;

        apply(&mut hvac);
        assert_eq!(hvac, before);
    }

    #[test]
    fn hot_cabin_cools_on_face() {
        let mut hvac = auto_hvac(30.0);
        apply(&mut hvac);

        assert!(hvac.ac_on);
        assert_eq!(hvac.fan_level, 7);
        assert_eq!(hvac.airflow_mode, Airflow::Face);
        assert!(!hvac.defrost_on);
    }

    #[test]
    fn cold_cabin_heats_feet_and_defrosts() {
        let mut hvac = HvacState {
            ac_on: true,
            ..auto_hvac(19.0)
        };
        apply(&mut hvac);

        assert!(!hvac.ac_on);
        assert_eq!(hvac.fan_level, 7);
        assert_eq!(hvac.airflow_mode, Airflow::Foot);
        assert!(hvac.defrost_on);
    }

    #[test]
    fn ac_holds_inside_hysteresis_band() {
        for ac_on in [true, false] {
            let mut hvac = HvacState {
                ac_on,
                ..auto_hvac(21.5)
            };
            apply(&mut hvac);
            assert_eq!(hvac.ac_on, ac_on);
        }

        assert_eq!(targets(0.5).ac_on, None);
        assert_eq!(targets(-1.0).ac_on, None);
        assert_eq!(targets(0.51).ac_on, Some(true));
        assert_eq!(targets(-1.01).ac_on, Some(false));
    }

    #[test]
    fn at_setpoint_fan_idles_on_bi_level() {
        let t = targets(0.0);
        assert_eq!(t.fan_level, 2);
        assert_eq!(t.airflow_mode, Airflow::BiLevel);
        assert!(!t.defrost_on);
    }

    #[test]
    fn airflow_boundaries_resolve_to_outer_modes() {
        assert_eq!(targets(0.5).airflow_mode, Airflow::Face);
        assert_eq!(targets(-0.5).airflow_mode, Airflow::Foot);
        assert_eq!(targets(0.49).airflow_mode, Airflow::BiLevel);
        assert_eq!(targets(-0.49).airflow_mode, Airflow::BiLevel);
    }

    #[test]
    fn fan_rounds_half_up() {
        // 2 + 3 * 0.5 = 3.5 rounds to 4.
        assert_eq!(targets(0.5).fan_level, 4);
        assert_eq!(targets(-0.5).fan_level, 4);
        // 2 + 3 * 1 = 5.
        assert_eq!(targets(1.0).fan_level, 5);
        assert_eq!(targets(100.0).fan_level, 7);
    }

    #[test]
    fn defrost_overrides_manual_setting() {
        let mut hvac = HvacState {
            defrost_on: true,
            ..auto_hvac(22.0)
        };
        apply(&mut hvac);
        assert!(!hvac.defrost_on);

        assert!(targets(-2.0).defrost_on);
        assert!(!targets(-1.99).defrost_on);
    }
}
