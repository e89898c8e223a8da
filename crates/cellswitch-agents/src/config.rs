//! Tunable constants for the cell behavior rules.
//!
//! [`BehaviorConfig`] bundles every constant the precursor rule reads so that
//! callers (the step driver, tests) can override the defaults. It
//! deserializes from the `behavior` section of `cellswitch-config.yaml`.

use serde::Deserialize;

use crate::error::{CellError, non_negative};

/// Substance quantity given to seeded precursor cells by default.
pub const INITIAL_SUBSTANCE_QUANTITY: f64 = 100.0;

/// Display tag of a precursor cell.
pub const PRECURSOR_COLOR: i32 = 0;

/// Configuration for the per-step cell behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Factor applied to the substance quantity each step (default: 0.99).
    ///
    /// Must lie in `[0, 1]`, so substance never grows and never goes negative.
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,

    /// Diameter added per step while below the cap (default: 0.2).
    #[serde(default = "default_growth_increment")]
    pub growth_increment: f64,

    /// A precursor whose post-decay substance falls strictly below this
    /// switches to the differentiated type (default: 75).
    #[serde(default = "default_substance_threshold")]
    pub substance_threshold: f64,

    /// Diameter assigned to every daughter (default: 6).
    ///
    /// Independent of the mother's `max_diameter`; a daughter may start at or
    /// above its own cap and divide on its first step.
    #[serde(default = "default_new_diameter")]
    pub default_new_diameter: f64,

    /// Display tag applied on the switch to differentiated (default: 1).
    #[serde(default = "default_differentiated_color")]
    pub differentiated_color: i32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            decay_factor: default_decay_factor(),
            growth_increment: default_growth_increment(),
            substance_threshold: default_substance_threshold(),
            default_new_diameter: default_new_diameter(),
            differentiated_color: default_differentiated_color(),
        }
    }
}

impl BehaviorConfig {
    /// Check that every constant keeps cell attributes finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CellError> {
        if !(self.decay_factor.is_finite() && (0.0..=1.0).contains(&self.decay_factor)) {
            return Err(CellError::InvalidConfig {
                reason: format!("decay_factor must be within [0, 1], got {}", self.decay_factor),
            });
        }
        for (field, value) in [
            ("growth_increment", self.growth_increment),
            ("substance_threshold", self.substance_threshold),
            ("default_new_diameter", self.default_new_diameter),
        ] {
            non_negative(field, value).map_err(|err| CellError::InvalidConfig {
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }
}

const fn default_decay_factor() -> f64 {
    0.99
}

const fn default_growth_increment() -> f64 {
    0.2
}

const fn default_substance_threshold() -> f64 {
    75.0
}

const fn default_new_diameter() -> f64 {
    crate::cell::DEFAULT_CELL_DIAMETER
}

const fn default_differentiated_color() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BehaviorConfig::default();
        assert!((cfg.decay_factor - 0.99).abs() < f64::EPSILON);
        assert!((cfg.growth_increment - 0.2).abs() < f64::EPSILON);
        assert!((cfg.substance_threshold - 75.0).abs() < f64::EPSILON);
        assert!((cfg.default_new_diameter - 6.0).abs() < f64::EPSILON);
        assert_eq!(cfg.differentiated_color, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn decay_factor_above_one_rejected() {
        let cfg = BehaviorConfig {
            decay_factor: 1.01,
            ..BehaviorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CellError::InvalidConfig { .. })));
    }

    #[test]
    fn negative_growth_increment_rejected() {
        let cfg = BehaviorConfig {
            growth_increment: -0.2,
            ..BehaviorConfig::default()
        };
        let err = cfg.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("growth_increment"));
    }

    #[test]
    fn nan_default_diameter_rejected() {
        let cfg = BehaviorConfig {
            default_new_diameter: f64::NAN,
            ..BehaviorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: Option<BehaviorConfig> =
            serde_json::from_str(r#"{"substance_threshold": 50.0}"#).ok();
        let cfg = cfg.unwrap_or_default();
        assert!((cfg.substance_threshold - 50.0).abs() < f64::EPSILON);
        assert!((cfg.decay_factor - 0.99).abs() < f64::EPSILON);
    }
}
