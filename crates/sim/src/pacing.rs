//! Host-side bounding of measured frame deltas.
//!
//! Forward Euler integration of cabin temperature is only stable for small
//! steps, so a host feeding wall-clock deltas must bound them. A stalled frame
//! is clamped to the maximum step, and a non-positive measurement (a clock that
//! did not advance or went backwards) is replaced by a nominal frame.

use cockpit_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use tracing::warn;

/// Largest step handed to the simulation, in seconds.
pub const DEFAULT_MAX_STEP_S: f64 = 0.05;

/// Step used when the measured delta is not positive, in seconds.
pub const DEFAULT_FALLBACK_STEP_S: f64 = 1.0 / 60.0;

/// Converts measured frame deltas into steps that are safe to integrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePacer {
    max_step_s: f64,
    fallback_step_s: f64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self {
            max_step_s: DEFAULT_MAX_STEP_S,
            fallback_step_s: DEFAULT_FALLBACK_STEP_S,
        }
    }
}

impl FramePacer {
    /// Creates a pacer from its step limits.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if either step is not strictly positive.
    pub fn new(max_step_s: f64, fallback_step_s: f64) -> Result<Self, ConstraintError> {
        Ok(Self::from_constrained(
            Constrained::new(max_step_s)?,
            Constrained::new(fallback_step_s)?,
        ))
    }

    /// Creates a pacer from step limits that are already known to be positive.
    #[must_use]
    pub fn from_constrained(
        max_step: Constrained<f64, StrictlyPositive>,
        fallback_step: Constrained<f64, StrictlyPositive>,
    ) -> Self {
        Self {
            max_step_s: max_step.into_inner(),
            fallback_step_s: fallback_step.into_inner(),
        }
    }

    #[must_use]
    pub fn max_step_s(&self) -> f64 {
        self.max_step_s
    }

    #[must_use]
    pub fn fallback_step_s(&self) -> f64 {
        self.fallback_step_s
    }

    /// Returns the step to simulate for a measured frame delta.
    #[must_use]
    pub fn pace(&self, measured_dt: f64) -> f64 {
        if measured_dt.is_nan() || measured_dt <= 0.0 {
            self.fallback_step_s
        } else if measured_dt > self.max_step_s {
            warn!(
                measured_s = measured_dt,
                max_step_s = self.max_step_s,
                "frame stalled, clamping step"
            );
            self.max_step_s
        } else {
            measured_dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_deltas_pass_through() {
        let pacer = FramePacer::default();
        assert_eq!(pacer.pace(0.016), 0.016);
        assert_eq!(pacer.pace(DEFAULT_MAX_STEP_S), DEFAULT_MAX_STEP_S);
    }

    #[test]
    fn stalls_are_clamped() {
        let pacer = FramePacer::default();
        assert_eq!(pacer.pace(0.75), DEFAULT_MAX_STEP_S);
        assert_eq!(pacer.pace(f64::INFINITY), DEFAULT_MAX_STEP_S);
    }

    #[test]
    fn non_positive_deltas_use_fallback() {
        let pacer = FramePacer::default();
        assert_eq!(pacer.pace(0.0), DEFAULT_FALLBACK_STEP_S);
        assert_eq!(pacer.pace(-0.2), DEFAULT_FALLBACK_STEP_S);
        assert_eq!(pacer.pace(f64::NAN), DEFAULT_FALLBACK_STEP_S);
    }

    #[test]
    fn custom_limits_are_validated() {
        let pacer = FramePacer::new(0.1, 0.02).unwrap();
        assert_eq!(pacer.pace(0.5), 0.1);
        assert_eq!(pacer.pace(0.0), 0.02);

        assert_eq!(FramePacer::new(0.0, 0.02), Err(ConstraintError::Zero));
        assert_eq!(FramePacer::new(0.1, -1.0), Err(ConstraintError::Negative));
    }
}
