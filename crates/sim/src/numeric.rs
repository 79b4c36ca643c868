//! Saturating numeric helpers shared by every sub-model.
//!
//! These are total functions: they never fail and never panic. Callers must
//! pass `min <= max`; with inverted bounds the result is one of the two bounds.

/// Clamps `value` into `[min, max]`.
#[must_use]
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamps an integer `value` into `[min, max]`.
#[must_use]
pub fn clamp_int(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Rounds to the nearest integer with halves rounded up, as `floor(x + 0.5)`.
///
/// This differs from [`f64::round`] for negative halves: `-2.5` becomes `-2.0`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snaps `value` onto the 0.5 grid using [`round_half_up`] on the doubled value.
#[must_use]
pub fn snap_to_half(value: f64) -> f64 {
    round_half_up(value * 2.0) / 2.0
}
