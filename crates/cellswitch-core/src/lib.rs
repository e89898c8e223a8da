//! Step clock, population store, and run loop for the cellswitch simulation.
//!
//! This crate drives the cell rules in `cellswitch-agents`: each step it
//! visits every cell present at the start of the step exactly once, runs its
//! bound behavior module, and admits any daughters afterwards.
//!
//! # Modules
//!
//! - [`clock`] -- Step counter with checked advance.
//! - [`config`] -- Configuration loading from `cellswitch-config.yaml` into
//!   strongly-typed structs.
//! - [`operator`] -- Stop flag, run bounds, and end reason shared with the
//!   run loop.
//! - [`population`] -- Ordered store of live cells.
//! - [`runner`] -- Async run loop with end conditions.
//! - [`step`] -- A single step pass over the population.

pub mod clock;
pub mod config;
pub mod operator;
pub mod population;
pub mod runner;
pub mod step;
