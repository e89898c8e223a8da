//! Enumeration types for the cellswitch simulation.

use serde::{Deserialize, Serialize};

/// Integer code of [`CellType::Precursor`].
pub const PRECURSOR_CODE: i32 = 1;

/// Integer code of [`CellType::Differentiated`].
pub const DIFFERENTIATED_CODE: i32 = 2;

/// Functional type of a cell.
///
/// Cell types travel as integer codes (`1` and `2`). Any other code is kept
/// verbatim in [`CellType::Unknown`] so that configurations written for a
/// newer rule set still load; cells of an unknown type are skipped by the
/// behavior dispatch rather than rejected.
///
/// The only transition is `Precursor -> Differentiated`. Both
/// `Differentiated` and `Unknown` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum CellType {
    /// Initial type: decays substance, grows, and divides.
    Precursor,
    /// Terminal type reached once the substance drops below threshold.
    Differentiated,
    /// A code with no behavior defined for it.
    Unknown(i32),
}

impl CellType {
    /// Map an integer code to a cell type. Total: every code maps somewhere.
    pub const fn from_code(code: i32) -> Self {
        match code {
            PRECURSOR_CODE => Self::Precursor,
            DIFFERENTIATED_CODE => Self::Differentiated,
            other => Self::Unknown(other),
        }
    }

    /// Return the integer code for this type.
    pub const fn code(self) -> i32 {
        match self {
            Self::Precursor => PRECURSOR_CODE,
            Self::Differentiated => DIFFERENTIATED_CODE,
            Self::Unknown(code) => code,
        }
    }
}

impl From<i32> for CellType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<CellType> for i32 {
    fn from(cell_type: CellType) -> Self {
        cell_type.code()
    }
}

impl core::fmt::Display for CellType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Precursor => write!(f, "precursor"),
            Self::Differentiated => write!(f, "differentiated"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}
