/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets a state quantity be advanced by explicit
/// (forward Euler) integration: `next = current + derivative * delta`.
/// `Delta` is usually elapsed simulated time in seconds.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}
