//! # Error Types
//!
//! Structured error types for fatigue_core. Only batch-wide problems are
//! errors: a missing or ambiguous steel grade, an unreadable project file,
//! a schema mismatch. Problems confined to a single check point (a negative
//! combined ratio, a zero permissible stress) never abort the run; they are
//! carried in the row result instead.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(t_max_mm: f64) -> CalcResult<()> {
//!     if t_max_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "thickness_limit_mm".to_string(),
//!             value: t_max_mm.to_string(),
//!             reason: "Thickness limit must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fatigue_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for fatigue check operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No steel table record matches the requested grade
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// More than one steel table record matches the requested grade
    #[error("Ambiguous material: {material_name} matches {matches} records")]
    AmbiguousMaterial { material_name: String, matches: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an AmbiguousMaterial error
    pub fn ambiguous_material(material_name: impl Into<String>, matches: usize) -> Self {
        CalcError::AmbiguousMaterial {
            material_name: material_name.into(),
            matches,
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from material resolution.
    ///
    /// Material errors are fatal for the whole batch: there is no safe
    /// default elastic limit or tensile strength.
    pub fn is_material_error(&self) -> bool {
        matches!(
            self,
            CalcError::MaterialNotFound { .. } | CalcError::AmbiguousMaterial { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::AmbiguousMaterial { .. } => "AMBIGUOUS_MATERIAL",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
