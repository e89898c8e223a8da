//! Configuration loading and typed config structures for the cellswitch
//! simulation.
//!
//! The canonical configuration lives in `cellswitch-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads and validates the file. Every
//! section is optional; an empty file reproduces the classic experiment of a
//! single precursor cell at `(0, 0, 10)` run for 500 steps.

use std::path::Path;

use cellswitch_agents::{BehaviorConfig, SeedCellParams};
use cellswitch_types::Position;
use serde::Deserialize;

/// Environment variable that overrides `simulation.max_steps`.
pub const MAX_STEPS_ENV: &str = "CELLSWITCH_MAX_STEPS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `cellswitch-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run-loop bounds and pacing.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Constants for the cell behavior rules.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Initial population.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `CELLSWITCH_MAX_STEPS` environment variable, when set, overrides
    /// `simulation.max_steps`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        if let Ok(val) = std::env::var(MAX_STEPS_ENV) {
            config.simulation.apply_max_steps_override(&val)?;
        }
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behavior.validate().map_err(|err| ConfigError::Invalid {
            reason: err.to_string(),
        })
    }
}

/// Run-loop bounds and pacing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Number of steps to run (0 = unlimited).
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Wall-clock limit in seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Real-time milliseconds to wait between steps (0 = run flat out).
    #[serde(default)]
    pub step_interval_ms: u64,
}

impl SimulationBoundsConfig {
    /// Replace `max_steps` with a value parsed from an override string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `raw` is not an unsigned integer.
    pub fn apply_max_steps_override(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.max_steps = raw.trim().parse().map_err(|err| ConfigError::Invalid {
            reason: format!("{MAX_STEPS_ENV}={raw:?} is not a step count: {err}"),
        })?;
        Ok(())
    }
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_real_time_seconds: 0,
            step_interval_ms: 0,
        }
    }
}

/// Initial population configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedConfig {
    /// Cells created before the first step.
    #[serde(default = "default_seed_cells")]
    pub cells: Vec<SeedCellParams>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            cells: default_seed_cells(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (used by serde)
// ---------------------------------------------------------------------------

const fn default_max_steps() -> u64 {
    500
}

fn default_seed_cells() -> Vec<SeedCellParams> {
    vec![SeedCellParams::precursor_at(Position::new(0.0, 0.0, 10.0))]
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cellswitch_types::CellType;

    use super::*;

    #[test]
    fn default_config_is_classic_experiment() {
        let config = SimulationConfig::default();
        assert_eq!(config.simulation.max_steps, 500);
        assert_eq!(config.simulation.step_interval_ms, 0);
        assert_eq!(config.seed.cells.len(), 1);

        let seed = config.seed.cells.first().unwrap();
        assert_eq!(seed.cell_type, CellType::Precursor);
        assert_eq!(seed.position, Position::new(0.0, 0.0, 10.0));
        assert!((seed.substance_quantity - 100.0).abs() < f64::EPSILON);
        assert!((seed.max_diameter - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
simulation:
  max_steps: 120
  max_real_time_seconds: 30
  step_interval_ms: 5

behavior:
  decay_factor: 0.95
  growth_increment: 0.5
  substance_threshold: 60.0
  default_new_diameter: 4.0
  differentiated_color: 3

seed:
  cells:
    - position: { x: 1.0, y: 2.0, z: 3.0 }
      cell_type: 1
      substance_quantity: 80.0
      diameter: 5.0
      max_diameter: 8.0
    - cell_type: 99

logging:
  level: debug
  json: true
";
        let config = SimulationConfig::parse(yaml).unwrap();

        assert_eq!(config.simulation.max_steps, 120);
        assert_eq!(config.simulation.max_real_time_seconds, 30);
        assert_eq!(config.simulation.step_interval_ms, 5);
        assert!((config.behavior.decay_factor - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.behavior.differentiated_color, 3);
        assert_eq!(config.seed.cells.len(), 2);

        let first = config.seed.cells.first().unwrap();
        assert_eq!(first.position, Position::new(1.0, 2.0, 3.0));
        assert!((first.max_diameter - 8.0).abs() < f64::EPSILON);

        let second = config.seed.cells.get(1).unwrap();
        assert_eq!(second.cell_type, CellType::Unknown(99));
        assert!((second.diameter - 6.0).abs() < f64::EPSILON);

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("simulation:\n  max_steps: 7\n").unwrap();
        assert_eq!(config.simulation.max_steps, 7);
        // Everything else uses defaults
        assert_eq!(config.seed.cells.len(), 1);
        assert!((config.behavior.growth_increment - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn invalid_behavior_rejected() {
        let result = SimulationConfig::parse("behavior:\n  decay_factor: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_rejected() {
        let result = SimulationConfig::parse("simulation: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn max_steps_override() {
        let mut bounds = SimulationBoundsConfig::default();
        bounds.apply_max_steps_override(" 42 ").unwrap();
        assert_eq!(bounds.max_steps, 42);
        assert!(bounds.apply_max_steps_override("many").is_err());
        assert_eq!(bounds.max_steps, 42);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("cellswitch-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
