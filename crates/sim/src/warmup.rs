//! Engine operating-temperature latch.
//!
//! The engine counts as warm once it has run for [`WARMUP_DURATION_S`], or
//! once it has been held above [`HOT_RPM_THRESHOLD`] for [`HOT_RPM_DURATION_S`]
//! without interruption. The latch never resets.

use tracing::info;

use crate::hvac::HvacState;

/// Running time after which the engine is warm regardless of load, in seconds.
pub const WARMUP_DURATION_S: f64 = 60.0;

/// Engine speed above which running counts as hard running, in RPM.
pub const HOT_RPM_THRESHOLD: f64 = 1500.0;

/// Continuous hard-running time after which the engine is warm, in seconds.
pub const HOT_RPM_DURATION_S: f64 = 10.0;

/// Advances the warmup timers by `dt` seconds at the given engine speed.
///
/// `rpm_hot_s` restarts from zero whenever the engine drops to or below the
/// threshold, so only an uninterrupted stretch of hard running counts.
pub fn advance(hvac: &mut HvacState, dt: f64, current_rpm: f64) {
    hvac.warmup_elapsed_s += dt;
    if current_rpm > HOT_RPM_THRESHOLD {
        hvac.rpm_hot_s += dt;
    } else {
        hvac.rpm_hot_s = 0.0;
    }

    if !hvac.engine_warm
        && (hvac.warmup_elapsed_s >= WARMUP_DURATION_S || hvac.rpm_hot_s >= HOT_RPM_DURATION_S)
    {
        hvac.engine_warm = true;
        info!(
            elapsed_s = hvac.warmup_elapsed_s,
            rpm_hot_s = hvac.rpm_hot_s,
            "engine reached operating temperature"
        );
    }
}
