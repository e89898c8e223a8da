//! Step pass: one discrete simulation step over the whole population.
//!
//! Each step:
//!
//! 1. **Advance** -- increment the step clock.
//! 2. **Behave** -- run the bound behavior module of every cell that was in
//!    the population when the step began, in admission order. Daughters
//!    produced during the pass are held back.
//! 3. **Admit** -- add the held-back daughters to the population. They are
//!    first visited on the next step.
//!
//! No rule reads another cell's state, so visiting order does not change
//! outcomes; admission order is used only to keep runs reproducible.

use cellswitch_agents::{Cell, CellError};
use cellswitch_types::{CellId, CellType};
use tracing::debug;

use crate::clock::{ClockError, StepClock};
use crate::population::{Population, PopulationError};

/// Errors that can occur during step execution.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A cell's behavior module failed.
    #[error("cell error for {cell_id}: {source}")]
    Cell {
        /// The cell being stepped.
        cell_id: CellId,
        /// The underlying cell error.
        source: CellError,
    },

    /// A daughter could not be admitted.
    #[error("population error: {source}")]
    Population {
        /// The underlying population error.
        #[from]
        source: PopulationError,
    },
}

/// Summary of a single step's execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// The step number that was executed.
    pub step: u64,
    /// Number of cells in the population at the end of the step.
    pub cells_alive: usize,
    /// Number of cells whose behavior ran this step.
    pub cells_stepped: usize,
    /// Number of divisions (daughters admitted) this step.
    pub divisions: usize,
    /// Number of precursor-to-differentiated switches this step.
    pub transitions: usize,
    /// Number of cells skipped because their type has no behavior.
    pub unknown_types: usize,
    /// Precursor cells at the end of the step.
    pub precursors: usize,
    /// Differentiated cells at the end of the step.
    pub differentiated: usize,
}

/// The mutable simulation state passed through each step.
#[derive(Debug, Default)]
pub struct SimulationState {
    /// The step clock.
    pub clock: StepClock,
    /// Every live cell.
    pub population: Population,
}

impl SimulationState {
    /// Wrap an already seeded population with a fresh clock.
    pub const fn new(population: Population) -> Self {
        Self {
            clock: StepClock::new(),
            population,
        }
    }
}

/// Execute one complete step of the simulation.
///
/// # Errors
///
/// Returns [`StepError`] if the clock overflows, a behavior module reports
/// a [`CellError`], or a daughter cannot be admitted. Cells stepped before
/// the failure keep their new state.
pub fn run_step(state: &mut SimulationState) -> Result<StepSummary, StepError> {
    let step = state.clock.advance()?;

    // Only cells present at the start of the step are visited.
    let ids: Vec<CellId> = state.population.ids().to_vec();
    let mut daughters: Vec<Cell> = Vec::new();
    let mut summary = StepSummary {
        step,
        ..StepSummary::default()
    };

    for cell_id in ids {
        let Some(cell) = state.population.get_mut(cell_id) else {
            continue;
        };

        let Some(outcome) = cell
            .run_behavior()
            .map_err(|source| StepError::Cell { cell_id, source })?
        else {
            debug!(step, %cell_id, "cell has no behavior bound, skipped");
            continue;
        };

        summary.cells_stepped = summary.cells_stepped.saturating_add(1);
        if outcome.transitioned {
            summary.transitions = summary.transitions.saturating_add(1);
        }
        if outcome.unknown_type.is_some() {
            summary.unknown_types = summary.unknown_types.saturating_add(1);
        }
        if let Some(daughter) = outcome.daughter {
            daughters.push(daughter);
        }
    }

    for daughter in daughters {
        state.population.admit(daughter)?;
        summary.divisions = summary.divisions.saturating_add(1);
    }

    let counts = state.population.count_by_type();
    summary.cells_alive = state.population.len();
    summary.precursors = counts.get(&CellType::Precursor).copied().unwrap_or(0);
    summary.differentiated = counts.get(&CellType::Differentiated).copied().unwrap_or(0);

    debug!(
        step,
        cells_alive = summary.cells_alive,
        divisions = summary.divisions,
        transitions = summary.transitions,
        precursors = summary.precursors,
        differentiated = summary.differentiated,
        "Step completed"
    );

    Ok(summary)
}
