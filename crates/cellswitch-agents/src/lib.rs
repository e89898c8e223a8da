//! Cell state, lifecycle rules, and division for the cellswitch simulation.
//!
//! This crate is the logic layer for cells: everything that operates on a
//! single cell's state without touching the population or the run loop. It
//! sits between `cellswitch-types` (plain data) and `cellswitch-core`
//! (step driver and configuration loading).
//!
//! # Modules
//!
//! - [`behavior`] -- [`BehaviorModule`] trait and the [`SwitchBehavior`] rules
//! - [`cell`] -- The [`Cell`] entity, seeding, and division
//! - [`config`] -- Tunable rule constants ([`BehaviorConfig`])
//! - [`error`] -- Error types for cell operations ([`CellError`])

pub mod behavior;
pub mod cell;
pub mod config;
pub mod error;

// Re-export primary types at crate root for convenience.
pub use behavior::{BehaviorModule, StepOutcome, SwitchBehavior};
pub use cell::{Cell, DEFAULT_CELL_DIAMETER, DEFAULT_MAX_DIAMETER, SeedCellParams};
pub use config::BehaviorConfig;
pub use error::CellError;
