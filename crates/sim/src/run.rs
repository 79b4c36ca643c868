//! Fixed-step runs of a [`Simulation`] with observation.
//!
//! A run ticks the simulation a fixed number of times at a constant step:
//!
//! ```text
//! state_{n+1} = tick(state_n, dt)
//! ```
//!
//! # Example
//!
//! ```
//! use cockpit_sim::{
//!     Simulation,
//!     run::{self, Action, Event, Status},
//! };
//!
//! let mut sim = Simulation::new();
//! sim.toggle_auto();
//!
//! // Stop as soon as the cabin is within a degree of the setpoint.
//! let solution = run::run(&mut sim, 0.05, 10_000, |event: &Event| {
//!     let hvac = &event.state.hvac;
//!     ((hvac.cabin_temp_c - hvac.setpoint_c).abs() < 1.0).then_some(Action::StopEarly)
//! });
//!
//! assert_eq!(solution.status, Status::StoppedByObserver);
//! ```

mod action;
mod event;
mod solution;

pub use action::Action;
pub use event::Event;
pub use solution::{Solution, Status};

use cockpit_core::Observer;

use crate::Simulation;

/// Ticks `sim` forward `steps` times by `dt` seconds.
///
/// # Algorithm
///
/// 1. Emit step 0 with the state before any tick.
/// 2. For each step:
///    - Tick the simulation by `dt`.
///    - Record the state in the history.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns [`Action::StopEarly`], terminate.
/// 3. Return the solution with the full history.
///
/// The simulation is left in its final state, so runs can be chained with
/// operator actions in between.
pub fn run<Obs>(sim: &mut Simulation, dt: f64, steps: usize, mut observer: Obs) -> Solution
where
    Obs: Observer<Event, Action>,
{
    let mut history = Vec::with_capacity(steps + 1);
    history.push(*sim.state());

    let event = Event::capture(0, sim);
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        };
    }

    for step in 1..=steps {
        sim.tick(dt);
        history.push(*sim.state());

        let event = Event::capture(step, sim);
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            };
        }
    }

    Solution {
        status: Status::Complete,
        history,
        steps,
    }
}

/// Ticks `sim` forward without observation.
///
/// This is a convenience wrapper around [`run`] that discards events.
pub fn run_unobserved(sim: &mut Simulation, dt: f64, steps: usize) -> Solution {
    run(sim, dt, steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn complete_run_records_every_step() {
        let mut sim = Simulation::new();

        let solution = run_unobserved(&mut sim, 0.1, 10);

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11); // initial + 10 steps
        assert_eq!(solution.history[0].runtime_s, 0.0);
        assert_relative_eq!(solution.final_state().runtime_s, 1.0, epsilon = 1e-12);
        assert_eq!(solution.final_state(), sim.state());
    }

    #[test]
    fn observer_can_stop_early() {
        let mut sim = Simulation::new();

        let solution = run(&mut sim, 0.1, 100, |event: &Event| {
            (event.step >= 5).then_some(Action::StopEarly)
        });

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let mut sim = Simulation::new();

        let solution = run_unobserved(&mut sim, 0.1, 0);

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.history, vec![*sim.state()]);
    }

    #[test]
    fn events_carry_heat_flows() {
        let mut sim = Simulation::new();
        sim.toggle_ac();
        sim.cycle_fan();

        let mut cooling = Vec::new();
        run(&mut sim, 0.05, 3, |event: &Event| {
            cooling.push(event.heat_flows.cooling);
            None
        });

        assert_eq!(cooling.len(), 4);
        assert_eq!(cooling[0], 0.0);
        assert!(cooling[1..].iter().all(|c| *c > 0.0));
    }
}
