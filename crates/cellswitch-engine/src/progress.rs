//! Step callback that reports run progress through `tracing`.
//!
//! Every step that changes the population (a division or a switch) is
//! logged at `info`, as is every `report_every`-th step. Quiet steps in
//! between are left to the core's `debug` summary.

use cellswitch_core::runner::StepCallback;
use cellswitch_core::step::{SimulationState, StepSummary};
use cellswitch_types::CellSnapshot;
use serde::Serialize;
use tracing::info;

/// Default number of steps between periodic progress lines.
pub const DEFAULT_REPORT_EVERY: u64 = 100;

/// Callback that logs population changes and periodic progress.
#[derive(Debug)]
pub struct ProgressCallback {
    report_every: u64,
    divisions: usize,
    transitions: usize,
}

impl ProgressCallback {
    /// Create a callback that logs a progress line every `report_every`
    /// steps (0 = only on changes).
    pub const fn new(report_every: u64) -> Self {
        Self {
            report_every,
            divisions: 0,
            transitions: 0,
        }
    }

    /// Divisions seen so far.
    pub const fn divisions(&self) -> usize {
        self.divisions
    }

    /// Precursor-to-differentiated switches seen so far.
    pub const fn transitions(&self) -> usize {
        self.transitions
    }

    fn is_report_step(&self, step: u64) -> bool {
        self.report_every > 0 && step.checked_rem(self.report_every) == Some(0)
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_EVERY)
    }
}

impl StepCallback for ProgressCallback {
    fn on_step(&mut self, summary: &StepSummary, _state: &SimulationState) {
        self.divisions = self.divisions.saturating_add(summary.divisions);
        self.transitions = self.transitions.saturating_add(summary.transitions);

        let changed = summary.divisions > 0 || summary.transitions > 0;
        if changed || self.is_report_step(summary.step) {
            info!(
                step = summary.step,
                cells_alive = summary.cells_alive,
                divisions = summary.divisions,
                transitions = summary.transitions,
                precursors = summary.precursors,
                differentiated = summary.differentiated,
                "Step progress"
            );
        }
    }
}

/// Final population written at shutdown.
#[derive(Debug, Serialize)]
pub struct PopulationReport {
    /// Last step executed.
    pub step: u64,
    /// Total divisions over the run.
    pub divisions: usize,
    /// Total switches over the run.
    pub transitions: usize,
    /// Every cell in admission order.
    pub cells: Vec<CellSnapshot>,
}

impl PopulationReport {
    /// Collect the report from the final state and the run's callback.
    pub fn collect(state: &SimulationState, progress: &ProgressCallback) -> Self {
        Self {
            step: state.clock.step(),
            divisions: progress.divisions(),
            transitions: progress.transitions(),
            cells: state.population.snapshots(),
        }
    }

    /// Render the report as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
