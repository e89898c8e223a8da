//! Initial population setup.
//!
//! Builds the behavior module from the `behavior` config section, creates
//! every cell listed under `seed.cells`, binds each one to the module, and
//! wraps the result in a fresh [`SimulationState`].

use std::sync::Arc;

use cellswitch_agents::{BehaviorModule, SwitchBehavior};
use cellswitch_core::config::SimulationConfig;
use cellswitch_core::population::Population;
use cellswitch_core::step::SimulationState;
use tracing::{debug, info};

use crate::error::EngineError;

/// Create the behavior module and seeded state described by `config`.
///
/// # Errors
///
/// Returns [`EngineError::Behavior`] if the behavior constants are invalid,
/// or [`EngineError::Seeding`] if any seed cell has invalid attributes.
pub fn seed_simulation(config: &SimulationConfig) -> Result<SimulationState, EngineError> {
    let behavior: Arc<dyn BehaviorModule> =
        Arc::new(SwitchBehavior::new(config.behavior.clone())?);

    let mut population = Population::new();
    let ids = population.seed(&config.seed.cells, &behavior)?;

    for cell in population.iter() {
        debug!(
            cell_id = %cell.id(),
            cell_type = %cell.cell_type(),
            x = cell.position().x,
            y = cell.position().y,
            z = cell.position().z,
            diameter = cell.diameter(),
            substance = cell.substance_quantity(),
            "Seed cell created"
        );
    }

    info!(
        cells = ids.len(),
        behavior = behavior.name(),
        "Initial population seeded"
    );

    Ok(SimulationState::new(population))
}
