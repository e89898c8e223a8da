//! End-to-end lifecycle of the classic experiment: one precursor cell at
//! `(0, 0, 10)` with 100 units of substance, run for 500 steps under the
//! default behavior constants.
//!
//! The mother grows 0.2 per step from 6.0. Twenty increments leave it a hair
//! under 10.0, so it grows a 21st time and first divides on step 22. Its
//! substance decays by 1% per step and falls below 75 on step 29, when it
//! divides one last time and then switches. Each daughter starts with no
//! substance, so it grows once and switches on the step after its birth.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::sync::Arc;

use cellswitch_agents::{BehaviorModule, SwitchBehavior};
use cellswitch_core::config::SimulationConfig;
use cellswitch_core::operator::{OperatorState, SimulationEndReason};
use cellswitch_core::population::Population;
use cellswitch_core::runner::{StepCallback, run_simulation};
use cellswitch_core::step::{SimulationState, StepSummary, run_step};
use cellswitch_types::CellType;

const EPS: f64 = 1e-9;

fn classic_state() -> (SimulationConfig, SimulationState) {
    let config = SimulationConfig::default();
    let behavior: Arc<dyn BehaviorModule> =
        Arc::new(SwitchBehavior::new(config.behavior.clone()).unwrap());
    let mut population = Population::new();
    population.seed(&config.seed.cells, &behavior).unwrap();
    (config, SimulationState::new(population))
}

/// Records every step summary.
#[derive(Default)]
struct Recorder {
    summaries: Vec<StepSummary>,
}

impl StepCallback for Recorder {
    fn on_step(&mut self, summary: &StepSummary, _state: &SimulationState) {
        self.summaries.push(summary.clone());
    }
}

#[tokio::test]
async fn classic_experiment_runs_to_completion() {
    let (config, mut state) = classic_state();
    let operator = Arc::new(OperatorState::new(&config.simulation));
    let mut recorder = Recorder::default();

    let result = run_simulation(&mut state, &operator, &mut recorder)
        .await
        .unwrap();

    assert_eq!(result.end_reason, SimulationEndReason::MaxStepsReached);
    assert_eq!(result.total_steps, 500);
    assert_eq!(recorder.summaries.len(), 500);

    // Mother plus eight daughters, all switched.
    assert_eq!(state.population.len(), 9);
    let counts = state.population.count_by_type();
    assert_eq!(counts.get(&CellType::Differentiated), Some(&9));
    assert_eq!(counts.get(&CellType::Precursor), None);

    let total_transitions: usize = recorder.summaries.iter().map(|s| s.transitions).sum();
    let total_divisions: usize = recorder.summaries.iter().map(|s| s.divisions).sum();
    assert_eq!(total_transitions, 9);
    assert_eq!(total_divisions, 8);

    let mother_id = state.population.ids()[0];
    let mother = state.population.get(mother_id).unwrap();
    assert!(mother.mother().is_none());
    assert!((mother.diameter() - 10.2).abs() < EPS);
    assert!(mother.substance_quantity().abs() < EPS);
    assert_eq!(mother.color(), 1);

    for daughter in state.population.iter().skip(1) {
        assert_eq!(daughter.mother(), Some(mother_id));
        assert_eq!(daughter.generation(), 1);
        assert_eq!(daughter.position(), mother.position());
        assert!((daughter.diameter() - 6.2).abs() < EPS);
        assert!((daughter.max_diameter() - 10.0).abs() < EPS);
        assert!(daughter.substance_quantity().abs() < EPS);
        assert_eq!(daughter.color(), 1);
    }
}

#[test]
fn division_and_switch_timeline() {
    let (_, mut state) = classic_state();
    let mut summaries = Vec::new();
    for _ in 0..40 {
        summaries.push(run_step(&mut state).unwrap());
    }

    let division_steps: Vec<u64> = summaries
        .iter()
        .filter(|s| s.divisions > 0)
        .map(|s| s.step)
        .collect();
    assert_eq!(division_steps, (22..=29).collect::<Vec<u64>>());
    assert!(summaries.iter().all(|s| s.divisions <= 1));

    let transitions: Vec<(u64, usize)> = summaries
        .iter()
        .filter(|s| s.transitions > 0)
        .map(|s| (s.step, s.transitions))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (23, 1),
            (24, 1),
            (25, 1),
            (26, 1),
            (27, 1),
            (28, 1),
            (29, 2),
            (30, 1)
        ]
    );

    // Nothing changes once every cell has switched.
    let settled = &summaries[30..];
    assert!(settled.iter().all(|s| s.cells_alive == 9));
    assert!(settled.iter().all(|s| s.precursors == 0));
    assert!(settled.iter().all(|s| s.transitions == 0 && s.divisions == 0));
}

#[test]
fn mother_is_below_max_before_first_division() {
    let (_, mut state) = classic_state();
    let mother_id = state.population.ids()[0];

    for _ in 0..20 {
        run_step(&mut state).unwrap();
    }
    let mother = state.population.get(mother_id).unwrap();
    assert!(mother.diameter() < 10.0);
    assert_eq!(state.population.len(), 1);

    run_step(&mut state).unwrap();
    let mother = state.population.get(mother_id).unwrap();
    assert!(mother.diameter() > 10.0);
    assert_eq!(state.population.len(), 1);

    run_step(&mut state).unwrap();
    assert_eq!(state.population.len(), 2);
}

#[test]
fn mother_substance_decays_geometrically() {
    let (_, mut state) = classic_state();
    let mother_id = state.population.ids()[0];

    let mut expected = 100.0_f64;
    for _ in 0..28 {
        run_step(&mut state).unwrap();
        expected *= 0.99;
        let mother = state.population.get(mother_id).unwrap();
        assert_eq!(mother.cell_type(), CellType::Precursor);
        assert!((mother.substance_quantity() - expected).abs() < EPS);
    }

    run_step(&mut state).unwrap();
    let mother = state.population.get(mother_id).unwrap();
    assert_eq!(mother.cell_type(), CellType::Differentiated);
    assert!(mother.substance_quantity().abs() < EPS);
}
