use crate::SimulationState;

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// State after each step, including the initial state.
    pub history: Vec<SimulationState>,

    /// Number of ticks completed.
    pub steps: usize,
}

impl Solution {
    /// The last recorded state.
    ///
    /// # Panics
    ///
    /// Panics if `history` has been emptied after the run returned.
    #[must_use]
    pub fn final_state(&self) -> &SimulationState {
        self.history
            .last()
            .expect("history always holds the initial state")
    }
}
