//! Simulation loop runner with operator controls.
//!
//! [`run_simulation`] drives [`run_step`] repeatedly until one of:
//!
//! - the step limit (`max_steps`) is reached,
//! - the wall-clock limit (`max_real_time_seconds`) is reached,
//! - the operator requests a stop,
//! - the population is empty.
//!
//! Between steps it sleeps for the configured step interval.
//!
//! [`run_step`]: crate::step::run_step

use std::sync::Arc;

use tracing::{info, warn};

use crate::operator::{OperatorState, SimulationEndReason};
use crate::step::{self, SimulationState, StepError, StepSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step execution failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: StepError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<StepSummary>,
    /// Total number of steps executed by this run.
    pub total_steps: u64,
}

/// Callback invoked after each step completes.
pub trait StepCallback: Send {
    /// Called after a step completes successfully.
    fn on_step(&mut self, summary: &StepSummary, state: &SimulationState);
}

/// A step callback that does nothing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _summary: &StepSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// Stop and time-limit checks happen before each step; the empty-population
/// check happens before the first step and after every step; the step limit
/// is checked after each step against the clock's absolute step number.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails. Steps completed before the
/// failure are not rolled back.
pub async fn run_simulation(
    state: &mut SimulationState,
    operator: &Arc<OperatorState>,
    callback: &mut dyn StepCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<StepSummary> = None;
    let mut total_steps: u64 = 0;

    info!(
        max_steps = operator.max_steps(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        step_interval_ms = operator.step_interval_ms(),
        cells = state.population.len(),
        "Simulation starting"
    );

    if state.population.is_empty() {
        return Ok(finish(operator, SimulationEndReason::EmptyPopulation, None, 0).await);
    }

    loop {
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            return Ok(finish(
                operator,
                SimulationEndReason::OperatorStop,
                last_summary,
                total_steps,
            )
            .await);
        }

        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            return Ok(finish(
                operator,
                SimulationEndReason::MaxRealTimeReached,
                last_summary,
                total_steps,
            )
            .await);
        }

        let summary = step::run_step(state)?;
        total_steps = total_steps.saturating_add(1);

        callback.on_step(&summary, state);

        if summary.cells_alive == 0 {
            info!(step = summary.step, "Population is empty");
            return Ok(finish(
                operator,
                SimulationEndReason::EmptyPopulation,
                Some(summary),
                total_steps,
            )
            .await);
        }

        // summary.step is the step that just ran: with max_steps = 5 the
        // loop stops once step 5 has completed.
        if operator.step_limit_reached(summary.step) {
            info!(
                step = summary.step,
                max_steps = operator.max_steps(),
                "Step limit reached"
            );
            return Ok(finish(
                operator,
                SimulationEndReason::MaxStepsReached,
                Some(summary),
                total_steps,
            )
            .await);
        }

        last_summary = Some(summary);

        let interval_ms = operator.step_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

async fn finish(
    operator: &OperatorState,
    end_reason: SimulationEndReason,
    final_summary: Option<StepSummary>,
    total_steps: u64,
) -> SimulationResult {
    operator.set_end_reason(end_reason).await;
    SimulationResult {
        end_reason,
        final_summary,
        total_steps,
    }
}

/// Log the outcome of a finished run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        final_step = result.final_summary.as_ref().map(|s| s.step),
        final_cells_alive = result.final_summary.as_ref().map(|s| s.cells_alive),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            step = summary.step,
            cells_alive = summary.cells_alive,
            precursors = summary.precursors,
            differentiated = summary.differentiated,
            "Final step summary"
        );
    } else {
        warn!("Simulation ended with no steps executed");
    }
}
