//! # Materials
//!
//! Material constants for the fatigue check and the steel grade table they
//! are resolved from.
//!
//! A fatigue run needs exactly two material values, shared by every check
//! point of the batch:
//!
//! - `sigma_e` - elastic limit of the steel (MPa)
//! - `sigma_r` - ultimate tensile strength of the steel (MPa)
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::materials::{MaterialConstants, SteelTable};
//!
//! // From the built-in table
//! let s235 = SteelTable::builtin().resolve("S 235", 40.0).unwrap();
//!
//! // Or explicitly
//! let custom = MaterialConstants::new(280.0, 440.0);
//! assert_eq!(custom.permissible_cap(), 0.66 * 280.0);
//! # let _ = s235;
//! ```

pub mod steel;

pub use steel::{SteelGrade, SteelTable, SteelValues, DEFAULT_THICKNESS_LIMIT_MM};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Fraction of the elastic limit that no permissible stress may exceed
pub const ELASTIC_LIMIT_CAP_FACTOR: f64 = 0.66;

/// Batch-wide material constants.
///
/// `Copy` and read-only: every check point of a run sees the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstants {
    /// Elastic limit sigma_E (MPa)
    pub sigma_e: f64,

    /// Ultimate tensile strength sigma_R (MPa)
    pub sigma_r: f64,
}

impl MaterialConstants {
    pub fn new(sigma_e: f64, sigma_r: f64) -> Self {
        MaterialConstants { sigma_e, sigma_r }
    }

    /// Upper bound for every tensile permissible stress: 0.66 sigma_E
    pub fn permissible_cap(&self) -> f64 {
        ELASTIC_LIMIT_CAP_FACTOR * self.sigma_e
    }

    /// Reject values that cannot come from a steel table.
    ///
    /// Zero is accepted: a degenerate constant must show up as non-finite
    /// ratios downstream, not as an input error.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("sigma_e", self.sigma_e), ("sigma_r", self.sigma_r)] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Material constant must be a finite number",
                ));
            }
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Material constant cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for MaterialConstants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sigma_E = {} MPa, sigma_R = {} MPa", self.sigma_e, self.sigma_r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissible_cap() {
        let constants = MaterialConstants::new(280.0, 440.0);
        assert!((constants.permissible_cap() - 184.8).abs() < 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(MaterialConstants::new(235.0, 360.0).validate().is_ok());
        assert!(MaterialConstants::new(235.0, 0.0).validate().is_ok());
        assert!(MaterialConstants::new(-1.0, 360.0).validate().is_err());
        assert!(MaterialConstants::new(235.0, f64::NAN).validate().is_err());
        assert!(MaterialConstants::new(f64::INFINITY, 360.0).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let constants = MaterialConstants::new(355.0, 470.0);
        let json = serde_json::to_string(&constants).unwrap();
        let roundtrip: MaterialConstants = serde_json::from_str(&json).unwrap();
        assert_eq!(constants, roundtrip);
    }
}
