//! The cell entity: identity, lineage, type, and the attributes the behavior
//! rules read and write.
//!
//! A [`Cell`] is created either by seeding ([`Cell::seed`]) or by division
//! ([`Cell::divide`]). It is never destroyed here; removing cells is the
//! population store's concern.
//!
//! Real-valued mutators validate their input. A negative or non-finite
//! diameter, cap, or substance quantity is rejected with
//! [`CellError::InvalidAttribute`] and the field keeps its old value, so
//! `diameter >= 0` and `substance_quantity >= 0` hold at every observable
//! point.

use std::sync::Arc;

use cellswitch_types::{CellId, CellSnapshot, CellType, Position};
use serde::Deserialize;

use crate::behavior::BehaviorModule;
use crate::config::{INITIAL_SUBSTANCE_QUANTITY, PRECURSOR_COLOR};
use crate::error::{CellError, non_negative};

/// Diameter given to a freshly divided cell before the behavior rule
/// overrides it with its configured default.
pub const DEFAULT_CELL_DIAMETER: f64 = 6.0;

/// Growth cap used when a seed does not specify one.
pub const DEFAULT_MAX_DIAMETER: f64 = 10.0;

/// Parameters for seeding a cell into an empty or running simulation.
///
/// The type must be chosen explicitly by the caller; there is no default
/// type enforced by the cell itself. Missing fields in YAML fall back to the
/// classic single-precursor experiment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedCellParams {
    /// Where the cell is placed.
    #[serde(default)]
    pub position: Position,
    /// Starting functional type.
    pub cell_type: CellType,
    /// Starting display tag.
    #[serde(default = "default_color")]
    pub color: i32,
    /// Starting diameter.
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    /// Diameter at which the cell divides instead of growing.
    #[serde(default = "default_max_diameter")]
    pub max_diameter: f64,
    /// Starting intracellular substance quantity.
    #[serde(default = "default_substance_quantity")]
    pub substance_quantity: f64,
}

impl SeedCellParams {
    /// A precursor at `position` with the classic starting values
    /// (color 0, diameter 6, cap 10, substance 100).
    pub const fn precursor_at(position: Position) -> Self {
        Self {
            position,
            cell_type: CellType::Precursor,
            color: PRECURSOR_COLOR,
            diameter: DEFAULT_CELL_DIAMETER,
            max_diameter: DEFAULT_MAX_DIAMETER,
            substance_quantity: INITIAL_SUBSTANCE_QUANTITY,
        }
    }
}

const fn default_color() -> i32 {
    PRECURSOR_COLOR
}

const fn default_diameter() -> f64 {
    DEFAULT_CELL_DIAMETER
}

const fn default_max_diameter() -> f64 {
    DEFAULT_MAX_DIAMETER
}

const fn default_substance_quantity() -> f64 {
    INITIAL_SUBSTANCE_QUANTITY
}

/// One simulated cell.
///
/// `Cell` is deliberately not `Clone`: every value is a distinct entity with
/// its own [`CellId`]. Use [`Cell::divide`] to create a related cell and
/// [`Cell::snapshot`] to copy out its observable state.
#[derive(Debug)]
pub struct Cell {
    id: CellId,
    mother: Option<CellId>,
    generation: u32,
    position: Position,
    cell_type: CellType,
    color: i32,
    diameter: f64,
    max_diameter: f64,
    substance_quantity: f64,
    behavior: Option<Arc<dyn BehaviorModule>>,
}

impl Cell {
    /// Create a seed cell (generation 0, no mother, no behavior bound).
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidAttribute`] if any real-valued parameter
    /// is negative or non-finite.
    pub fn seed(params: &SeedCellParams) -> Result<Self, CellError> {
        Ok(Self {
            id: CellId::new(),
            mother: None,
            generation: 0,
            position: params.position,
            cell_type: params.cell_type,
            color: params.color,
            diameter: non_negative("diameter", params.diameter)?,
            max_diameter: non_negative("max_diameter", params.max_diameter)?,
            substance_quantity: non_negative("substance_quantity", params.substance_quantity)?,
            behavior: None,
        })
    }

    /// Bind a behavior module, returning the cell (builder style).
    #[must_use]
    pub fn with_behavior(mut self, behavior: Arc<dyn BehaviorModule>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Bind (or replace) this cell's behavior module.
    pub fn bind_behavior(&mut self, behavior: Arc<dyn BehaviorModule>) {
        self.behavior = Some(behavior);
    }

    /// The behavior module bound to this cell, if any.
    pub const fn behavior(&self) -> Option<&Arc<dyn BehaviorModule>> {
        self.behavior.as_ref()
    }

    /// Create a daughter cell from this cell's current state.
    ///
    /// The daughter gets a fresh id and copies the mother's type, color,
    /// growth cap, position, and behavior binding. Its diameter is reset to
    /// [`DEFAULT_CELL_DIAMETER`] regardless of the cap, and it starts with no
    /// substance. The mother is left untouched.
    ///
    /// Registering the daughter with a population is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::GenerationOverflow`] if the generation counter
    /// cannot be incremented.
    pub fn divide(&self) -> Result<Self, CellError> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or(CellError::GenerationOverflow { cell_id: self.id })?;

        Ok(Self {
            id: CellId::new(),
            mother: Some(self.id),
            generation,
            position: self.position,
            cell_type: self.cell_type,
            color: self.color,
            diameter: DEFAULT_CELL_DIAMETER,
            max_diameter: self.max_diameter,
            substance_quantity: 0.0,
            behavior: self.behavior.clone(),
        })
    }

    /// Copy out the observable state of this cell.
    pub const fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            mother: self.mother,
            generation: self.generation,
            position: self.position,
            cell_type: self.cell_type,
            color: self.color,
            diameter: self.diameter,
            max_diameter: self.max_diameter,
            substance_quantity: self.substance_quantity,
        }
    }

    // -----------------------------------------------------------------------
    // Identity and lineage
    // -----------------------------------------------------------------------

    /// This cell's identifier.
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// The cell this one divided from, `None` for seeded cells.
    pub const fn mother(&self) -> Option<CellId> {
        self.mother
    }

    /// Number of divisions separating this cell from its seeded ancestor.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Position in simulation space.
    pub const fn position(&self) -> Position {
        self.position
    }

    // -----------------------------------------------------------------------
    // Accessors and mutators
    // -----------------------------------------------------------------------

    /// Current functional type.
    pub const fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Set the functional type. Any value is accepted, including unknown codes.
    pub const fn set_cell_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
    }

    /// Current display tag.
    pub const fn color(&self) -> i32 {
        self.color
    }

    /// Set the display tag.
    pub const fn set_color(&mut self, color: i32) {
        self.color = color;
    }

    /// Current intracellular substance quantity.
    pub const fn substance_quantity(&self) -> f64 {
        self.substance_quantity
    }

    /// Set the substance quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidAttribute`] for negative or non-finite
    /// values; the stored quantity is unchanged.
    pub fn set_substance_quantity(&mut self, quantity: f64) -> Result<(), CellError> {
        self.substance_quantity = non_negative("substance_quantity", quantity)?;
        Ok(())
    }

    /// Current diameter.
    pub const fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Set the diameter.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidAttribute`] for negative or non-finite
    /// values; the stored diameter is unchanged.
    pub fn set_diameter(&mut self, diameter: f64) -> Result<(), CellError> {
        self.diameter = non_negative("diameter", diameter)?;
        Ok(())
    }

    /// Diameter at which the cell divides instead of growing.
    pub const fn max_diameter(&self) -> f64 {
        self.max_diameter
    }

    /// Set the growth cap.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidAttribute`] for negative or non-finite
    /// values; the stored cap is unchanged.
    pub fn set_max_diameter(&mut self, max_diameter: f64) -> Result<(), CellError> {
        self.max_diameter = non_negative("max_diameter", max_diameter)?;
        Ok(())
    }
}
