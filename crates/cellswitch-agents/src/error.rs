//! Error types for the cellswitch-agents crate.
//!
//! Cell mutators reject values that would break the non-negativity
//! invariants instead of storing them. An unrecognized cell type is *not* an
//! error: the behavior dispatch handles it as a logged no-op.

use cellswitch_types::CellId;

/// Errors that can occur during cell state operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CellError {
    /// A real-valued attribute was given a negative, NaN, or infinite value.
    #[error("invalid value {value} for {attribute}: must be finite and non-negative")]
    InvalidAttribute {
        /// Name of the attribute being set.
        attribute: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A behavior configuration failed validation.
    #[error("invalid behavior config: {reason}")]
    InvalidConfig {
        /// Description of what is wrong with the configuration.
        reason: String,
    },

    /// The generation counter would overflow when dividing.
    #[error("generation overflow dividing cell {cell_id}")]
    GenerationOverflow {
        /// The mother cell that attempted to divide.
        cell_id: CellId,
    },
}

/// Check that `value` is finite and non-negative, returning it unchanged.
pub(crate) fn non_negative(attribute: &'static str, value: f64) -> Result<f64, CellError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CellError::InvalidAttribute { attribute, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert!(non_negative("diameter", 0.0).is_ok());
        assert!(non_negative("diameter", 6.0).is_ok());
    }

    #[test]
    fn rejects_negative_nan_and_infinite() {
        assert!(non_negative("diameter", -0.1).is_err());
        assert!(non_negative("diameter", f64::NAN).is_err());
        assert!(non_negative("diameter", f64::INFINITY).is_err());
    }

    #[test]
    fn error_message_names_attribute() {
        let err = non_negative("substance_quantity", -1.0).err();
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("substance_quantity"));
    }
}
