//! Engine binary for the cellswitch simulation.
//!
//! Wires configuration, logging, seeding, and the run loop together and
//! runs the simulation until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `cellswitch-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the behavior module and seed the initial population
//! 4. Create operator state from the simulation bounds
//! 5. Install the Ctrl-C handler (clean stop after the current step)
//! 6. Run the simulation loop
//! 7. Log the result and the final population report

mod error;
mod progress;
mod seeding;

use std::path::Path;
use std::sync::Arc;

use cellswitch_core::config::{LoggingConfig, SimulationConfig};
use cellswitch_core::operator::OperatorState;
use cellswitch_core::runner;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::{PopulationReport, ProgressCallback};

/// Configuration file read from the working directory.
const CONFIG_PATH: &str = "cellswitch-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so report afterwards.
    let (config, from_file) = load_config(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("cellswitch-engine starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        max_steps = config.simulation.max_steps,
        max_real_time_seconds = config.simulation.max_real_time_seconds,
        step_interval_ms = config.simulation.step_interval_ms,
        decay_factor = config.behavior.decay_factor,
        growth_increment = config.behavior.growth_increment,
        substance_threshold = config.behavior.substance_threshold,
        seed_cells = config.seed.cells.len(),
        "Simulation parameters"
    );

    // 3. Seed the initial population.
    let mut state = seeding::seed_simulation(&config)?;

    // 4. Create operator state.
    let operator = Arc::new(OperatorState::new(&config.simulation));

    // 5. Ctrl-C requests a clean stop; the step in progress completes.
    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping after the current step");
                    operator.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 6. Run the simulation.
    let mut progress = ProgressCallback::default();
    let result = runner::run_simulation(&mut state, &operator, &mut progress).await?;

    // 7. Log results.
    runner::log_simulation_end(&result);
    let report = PopulationReport::collect(&state, &progress)
        .to_json()
        .map_err(EngineError::from)?;
    info!(report = %report, "Final population");

    info!(
        end_reason = ?result.end_reason,
        total_steps = result.total_steps,
        "cellswitch-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `path`.
///
/// Returns the configuration and whether it came from the file.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log filter {:?}: {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}
