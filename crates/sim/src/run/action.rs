/// Control actions an observer can request during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the history so far.
    StopEarly,
}
