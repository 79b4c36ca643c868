/// Receives runner events and decides how the run should proceed.
///
/// Observers let callers monitor or steer a simulation run without changing
/// its API, enabling logging, recording, or early stopping.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// runner-specific action and `None` lets the run continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Halt {
        Now,
    }

    fn drive<O: Observer<u32, Halt>>(mut observer: O, events: &[u32]) -> usize {
        for (seen, event) in events.iter().enumerate() {
            if observer.observe(event) == Some(Halt::Now) {
                return seen + 1;
            }
        }
        events.len()
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), &[1, 2, 3]), 3);
    }

    #[test]
    fn closure_observer_can_halt() {
        let seen = drive(
            |event: &u32| (*event >= 2).then_some(Halt::Now),
            &[1, 2, 3, 4],
        );
        assert_eq!(seen, 2);
    }
}
