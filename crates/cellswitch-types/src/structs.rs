//! Plain data structs shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::enums::CellType;
use crate::ids::CellId;

/// A point in 3-D simulation space.
///
/// Positions are set when a cell is created. Moving cells afterwards is the
/// business of the mechanics engine, which is not part of this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// Create a position from its three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Read-only view of a cell's observable state at one instant.
///
/// Snapshots are what step callbacks and log lines see; they carry no
/// behavior binding and can be serialized freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// The cell's identifier.
    pub id: CellId,
    /// The mother this cell divided from, `None` for seeded cells.
    pub mother: Option<CellId>,
    /// Number of divisions between this cell and its seeded ancestor.
    pub generation: u32,
    /// Position in simulation space.
    pub position: Position,
    /// Functional type.
    pub cell_type: CellType,
    /// Display tag.
    pub color: i32,
    /// Current diameter.
    pub diameter: f64,
    /// Diameter at which the cell divides instead of growing.
    pub max_diameter: f64,
    /// Intracellular substance quantity.
    pub substance_quantity: f64,
}
