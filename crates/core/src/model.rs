/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic, always producing the same result for a given
/// input. The simulator's physical laws are written as models so that their
/// intermediate terms can be inspected separately from the state update.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// Doubles a fan level, saturating at the top of the range.
    struct Booster;

    impl Model for Booster {
        type Input = i32;
        type Output = i32;
        type Error = Infallible;

        fn call(&self, input: &i32) -> Result<i32, Infallible> {
            Ok((input * 2).min(7))
        }
    }

    #[test]
    fn call_is_deterministic() {
        assert_eq!(Booster.call(&3).unwrap(), 6);
        assert_eq!(Booster.call(&3).unwrap(), 6);
        assert_eq!(Booster.call(&5).unwrap(), 7);
    }
}
