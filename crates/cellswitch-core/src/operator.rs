//! Operator control state for runtime simulation management.
//!
//! The run loop and whoever drives it (the engine's Ctrl-C handler, a test,
//! an embedding application) share one [`OperatorState`] behind an [`Arc`].
//! Through it the operator can request a clean stop without tearing down the
//! process; the state also carries the run bounds and records why the run
//! ended.
//!
//! The stop flag is an atomic so the run loop reads it without locking.
//!
//! [`Arc`]: std::sync::Arc

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::SimulationBoundsConfig;

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_steps` limit.
    MaxStepsReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// An operator issued a stop command.
    OperatorStop,
    /// The population has no cells left to step.
    EmptyPopulation,
}

/// Shared operator control state.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Real-time milliseconds to wait between steps.
    step_interval_ms: u64,

    /// When this state was created.
    started_at: Instant,

    /// Maximum number of steps (0 = unlimited).
    max_steps: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,

    /// Reason the simulation ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Create a new operator state from the run bounds.
    pub fn new(bounds: &SimulationBoundsConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            step_interval_ms: bounds.step_interval_ms,
            started_at: Instant::now(),
            max_steps: bounds.max_steps,
            max_real_time_seconds: bounds.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean simulation stop.
    ///
    /// The step in progress, if any, completes first.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason the simulation ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the simulation ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Milliseconds to wait between steps (0 = back to back).
    pub const fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms
    }

    /// Returns `true` if `max_steps > 0` and `current_step >= max_steps`.
    pub const fn step_limit_reached(&self, current_step: u64) -> bool {
        self.max_steps > 0 && current_step >= self.max_steps
    }

    /// Returns `true` if `max_real_time_seconds > 0` and at least that many
    /// seconds have elapsed since start.
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Return elapsed whole seconds since start.
    pub fn elapsed_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Get the configured max steps.
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Get the configured max real-time seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}
