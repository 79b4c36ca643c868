use super::{Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl Constraint<f64> for StrictlyPositive {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if *value < 0.0 {
            Err(ConstraintError::Negative)
        } else if *value == 0.0 {
            Err(ConstraintError::Zero)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constraint::Constrained;

    #[test]
    fn accepts_positive_step_sizes() {
        let step = Constrained::<f64, StrictlyPositive>::new(1.0 / 60.0).unwrap();
        assert_eq!(step.into_inner(), 1.0 / 60.0);
    }

    #[test]
    fn rejects_zero_negative_and_nan() {
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(0.0),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(-0.05),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }
}
