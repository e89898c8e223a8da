//! Shared type definitions for the cellswitch simulation.
//!
//! This crate holds the plain data every other crate in the workspace agrees
//! on: identifiers, the cell type tag, and serializable snapshots. It has no
//! behavior of its own.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for cell identifiers
//! - [`enums`] -- The [`CellType`] tag with its integer wire codes
//! - [`structs`] -- [`Position`] and the read-only [`CellSnapshot`]

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::CellType;
pub use ids::CellId;
pub use structs::{CellSnapshot, Position};
