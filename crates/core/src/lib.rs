//! Core traits and types for the cockpit simulator.
//!
//! This crate defines the shared abstractions that the vehicle and climate
//! models and the simulation runner build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Observer`]: receives runner events and optionally returns control actions
//! - [`StepIntegrable`]: a state that can be advanced by a derivative and a step size
//! - [`constraint`]: numeric invariants checked once at construction time

pub mod constraint;

mod model;
mod observer;
mod step;

pub use model::Model;
pub use observer::Observer;
pub use step::StepIntegrable;
