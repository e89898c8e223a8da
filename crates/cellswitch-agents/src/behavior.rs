//! Per-step cell behavior: type dispatch and the precursor rule.
//!
//! The driver calls [`BehaviorModule::run`] once per cell per step. A module
//! holds configuration only; all per-cell state lives on the [`Cell`], so a
//! single module instance can be shared by every cell in the population.
//!
//! # Dispatch
//!
//! [`SwitchBehavior`] matches on the cell's type:
//!
//! - `Precursor` -- run the precursor rule below
//! - `Differentiated` -- no-op
//! - `Unknown(code)` -- log a warning, mutate nothing
//!
//! # Precursor rule, in order
//!
//! 1. Decay: `substance *= decay_factor`
//! 2. Grow by `growth_increment` if `diameter < max_diameter`; otherwise
//!    divide and give the daughter `default_new_diameter`. The mother keeps
//!    its diameter, so it divides again next step while still a precursor.
//! 3. If the post-decay substance is below `substance_threshold`: switch to
//!    differentiated, set the differentiated color, zero the substance.
//!
//! Decay must precede the threshold check so the switch happens on the step
//! the threshold is first crossed.

use cellswitch_types::CellType;
use tracing::{debug, info, warn};

use crate::cell::Cell;
use crate::config::BehaviorConfig;
use crate::error::{CellError, non_negative};

/// What one behavior step produced, beyond mutating the cell itself.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// A daughter created by division. The caller must admit it into the
    /// population; it should not be stepped again in the current pass.
    pub daughter: Option<Cell>,
    /// Whether the cell switched to the differentiated type this step.
    pub transitioned: bool,
    /// Set to the type code when no behavior is defined for the cell's type.
    pub unknown_type: Option<i32>,
}

/// A stateless unit of per-step logic bound to cells.
///
/// Implementations must not keep per-cell mutable state; anything that
/// changes between steps belongs on the [`Cell`].
pub trait BehaviorModule: Send + Sync + core::fmt::Debug {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Execute exactly one step of logic for `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`CellError`] only if a rule would break a cell invariant
    /// (for example a diameter overflowing to infinity). Unknown cell types
    /// are not errors.
    fn run(&self, cell: &mut Cell) -> Result<StepOutcome, CellError>;
}

/// The precursor/differentiated switching behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBehavior {
    config: BehaviorConfig,
}

impl SwitchBehavior {
    /// Build the behavior from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: BehaviorConfig) -> Result<Self, CellError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The constants this behavior runs with.
    pub const fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    fn precursor_step(&self, cell: &mut Cell) -> Result<StepOutcome, CellError> {
        // 1. Decay. Stored only once grow-or-divide succeeds, so a failed
        // step leaves the cell as it was.
        let decayed = non_negative(
            "substance_quantity",
            cell.substance_quantity() * self.config.decay_factor,
        )?;

        // 2. Grow or divide
        let daughter = self.grow_or_divide(cell)?;
        cell.set_substance_quantity(decayed)?;

        // 3. Threshold check against the post-decay value
        let transitioned = decayed < self.config.substance_threshold;
        if transitioned {
            cell.set_cell_type(CellType::Differentiated);
            cell.set_color(self.config.differentiated_color);
            cell.set_substance_quantity(0.0)?;
            info!(
                cell_id = %cell.id(),
                substance = decayed,
                threshold = self.config.substance_threshold,
                "cell switched to differentiated type"
            );
        }

        Ok(StepOutcome {
            daughter,
            transitioned,
            unknown_type: None,
        })
    }

    fn grow_or_divide(&self, cell: &mut Cell) -> Result<Option<Cell>, CellError> {
        if cell.diameter() < cell.max_diameter() {
            cell.set_diameter(cell.diameter() + self.config.growth_increment)?;
            return Ok(None);
        }

        let mut daughter = cell.divide()?;
        daughter.set_diameter(self.config.default_new_diameter)?;
        debug!(
            mother = %cell.id(),
            daughter = %daughter.id(),
            generation = daughter.generation(),
            "cell divided"
        );
        Ok(Some(daughter))
    }
}

impl BehaviorModule for SwitchBehavior {
    fn name(&self) -> &'static str {
        "switch"
    }

    fn run(&self, cell: &mut Cell) -> Result<StepOutcome, CellError> {
        match cell.cell_type() {
            CellType::Precursor => self.precursor_step(cell),
            // Reserved for future rules.
            CellType::Differentiated => Ok(StepOutcome::default()),
            CellType::Unknown(code) => {
                warn!(cell_id = %cell.id(), cell_type = code, "no behaviour defined for cell type");
                Ok(StepOutcome {
                    unknown_type: Some(code),
                    ..StepOutcome::default()
                })
            }
        }
    }
}

impl Cell {
    /// Run the cell's bound behavior module for one step.
    ///
    /// Returns `Ok(None)` when no module is bound.
    ///
    /// # Errors
    ///
    /// Propagates any [`CellError`] from the module.
    pub fn run_behavior(&mut self) -> Result<Option<StepOutcome>, CellError> {
        let Some(behavior) = self.behavior().cloned() else {
            return Ok(None);
        };
        behavior.run(self).map(Some)
    }
}
