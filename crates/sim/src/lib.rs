//! Fixed-step simulation of a vehicle drivetrain and its climate-control panel.
//!
//! A single [`Simulation`] owns the whole [`SimulationState`]. Operator inputs
//! arrive as discrete actions (signal stalk, pedals, climate buttons) that
//! mutate the state immediately, while [`Simulation::tick`] advances every
//! continuous sub-model by an elapsed-time delta in a fixed order:
//!
//! 1. [`indicators`]: turn-signal and hazard blink phase
//! 2. [`dynamics`]: speed, engine RPM, and fuel
//! 3. [`warmup`]: engine operating-temperature latch
//! 4. [`thermal`]: auto-climate law ([`climate`]) followed by cabin temperature
//!
//! Nothing in the engine can fail: out-of-range inputs are clamped rather than
//! rejected. Fallible operations are limited to the boundary, such as loading a
//! [`SimulationConfig`] from TOML.
//!
//! # Example
//!
//! ```
//! use cockpit_sim::Simulation;
//!
//! let mut sim = Simulation::new();
//! sim.adjust_throttle(40.0);
//! for _ in 0..60 {
//!     sim.tick(1.0 / 60.0);
//! }
//!
//! let state = sim.state();
//! assert!(state.velocity_kmh > 0.0);
//! assert_eq!(state.rpm, (800.0 + state.velocity_kmh * 60.0).min(7000.0));
//! ```

pub mod climate;
pub mod config;
pub mod controls;
pub mod dynamics;
pub mod hvac;
pub mod indicators;
pub mod numeric;
pub mod pacing;
pub mod run;
pub mod thermal;
pub mod warmup;

mod engine;
mod state;

pub use config::{ConfigError, InitialConditions, PacingConfig, SimulationConfig};
pub use engine::Simulation;
pub use hvac::{Airflow, HvacState};
pub use indicators::IndicatorState;
pub use pacing::FramePacer;
pub use state::SimulationState;
pub use thermal::HeatFlows;
