use crate::{HeatFlows, Simulation, SimulationState};

/// Event emitted by a run after each step.
///
/// Step 0 is the state before any tick.
/// Steps 1..N are emitted after each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The step number (0 for initial, 1..N for ticks).
    pub step: usize,

    /// State of the simulation after this step.
    pub state: SimulationState,

    /// Heat flows used by the thermal model during this step.
    pub heat_flows: HeatFlows,
}

impl Event {
    pub(super) fn capture(step: usize, sim: &Simulation) -> Self {
        Self {
            step,
            state: *sim.state(),
            heat_flows: sim.heat_flows(),
        }
    }
}
