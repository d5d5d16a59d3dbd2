//! # Fatigue Project
//!
//! The `FatigueProject` struct is the root container of a fatigue check: who
//! ran it, which steel and settings apply, and the ordered list of check
//! points. Projects serialize to human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! FatigueProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: FatigueSettings (steel grade, thickness limit, formulation)
//! └── check_points: Vec<StructuralCheckPoint> (batch order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::project::FatigueProject;
//! use fatigue_core::materials::SteelTable;
//!
//! let project = FatigueProject::new("Jane Engineer", "25-042", "ACME Cranes");
//! let material = project.material_constants(SteelTable::builtin()).unwrap();
//! assert_eq!(material.sigma_e, 225.0); // S 235, t <= 40 mm
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::batch::{BatchReport, FatigueBatch};
use crate::calculations::check_point::StructuralCheckPoint;
use crate::calculations::validator::Formulation;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{MaterialConstants, SteelTable, DEFAULT_THICKNESS_LIMIT_MM};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueProject {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Settings of the fatigue check
    #[serde(default)]
    pub settings: FatigueSettings,

    /// Check points in batch order
    #[serde(default)]
    pub check_points: Vec<StructuralCheckPoint>,
}

impl FatigueProject {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fatigue_core::project::FatigueProject;
    ///
    /// let project = FatigueProject::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.check_points.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        FatigueProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: FatigueSettings::default(),
            check_points: Vec::new(),
        }
    }

    /// Append a check point. Returns its index.
    pub fn add_check_point(&mut self, point: StructuralCheckPoint) -> usize {
        self.check_points.push(point);
        self.touch();
        self.check_points.len() - 1
    }

    /// Remove the check point at `index`, if any.
    pub fn remove_check_point(&mut self, index: usize) -> Option<StructuralCheckPoint> {
        if index < self.check_points.len() {
            let point = self.check_points.remove(index);
            self.touch();
            Some(point)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Resolve the material constants of this project.
    ///
    /// An explicit `material_override` wins over the steel table. A failed
    /// lookup is fatal for the run.
    pub fn material_constants(&self, table: &SteelTable) -> CalcResult<MaterialConstants> {
        if let Some(constants) = self.settings.material_override {
            constants.validate()?;
            return Ok(constants);
        }

        if self.settings.steel_grade.trim().is_empty() {
            return Err(CalcError::missing_field("settings.steel_grade"));
        }
        self.settings.validate()?;

        table.resolve(&self.settings.steel_grade, self.settings.thickness_limit_mm)
    }

    /// Build the immutable batch for a run
    pub fn batch(&self, table: &SteelTable) -> CalcResult<FatigueBatch> {
        let material = self.material_constants(table)?;
        Ok(FatigueBatch::new(material, self.check_points.clone()))
    }

    /// Resolve material, build the batch and evaluate it with the project's formulation
    pub fn evaluate(&self, table: &SteelTable) -> CalcResult<BatchReport> {
        let batch = self.batch(table)?;
        tracing::info!(
            job_id = %self.meta.job_id,
            material = %batch.material(),
            check_points = batch.len(),
            "evaluating fatigue project"
        );
        Ok(batch.evaluate(self.settings.governing))
    }
}

impl Default for FatigueProject {
    fn default() -> Self {
        FatigueProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Settings of a fatigue check.
///
/// Fields missing from a project file take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueSettings {
    /// Standard the check follows
    pub standard: String,

    /// Steel grade name (e.g., "S 235", "Fe 510")
    pub steel_grade: String,

    /// Nominal thickness limit (mm) selecting the steel table row
    pub thickness_limit_mm: f64,

    /// Combined ratio that decides each verdict
    pub governing: Formulation,

    /// Explicit material constants, bypassing the steel table
    pub material_override: Option<MaterialConstants>,
}

impl FatigueSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.thickness_limit_mm.is_finite() && self.thickness_limit_mm > 0.0) {
            return Err(CalcError::invalid_input(
                "settings.thickness_limit_mm",
                self.thickness_limit_mm.to_string(),
                "Thickness limit must be a positive number",
            ));
        }
        Ok(())
    }
}

impl Default for FatigueSettings {
    fn default() -> Self {
        FatigueSettings {
            standard: "FEM 2131/2132".to_string(),
            steel_grade: "S 235".to_string(),
            thickness_limit_mm: DEFAULT_THICKNESS_LIMIT_MM,
            governing: Formulation::Ratio1,
            material_override: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::check_point::CheckPointLabels;

    #[test]
    fn test_project_creation() {
        let project = FatigueProject::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.steel_grade, "S 235");
    }

    #[test]
    fn test_project_serialization() {
        let project = FatigueProject::new("Jane Engineer", "25-042", "Test Client");
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("FEM 2131/2132"));

        let roundtrip: FatigueProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.settings, project.settings);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "E",
                "job_id": "J",
                "client": "C",
                "created": "2025-01-21T13:19:00Z",
                "modified": "2025-01-21T13:19:00Z"
            },
            "settings": { "steel_grade": "Fe 510" }
        }"#;
        let project: FatigueProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.settings.steel_grade, "Fe 510");
        assert_eq!(project.settings.thickness_limit_mm, 40.0);
        assert_eq!(project.settings.governing, Formulation::Ratio1);
        assert!(project.check_points.is_empty());
    }

    #[test]
    fn test_add_remove_check_point() {
        let mut project = FatigueProject::new("Engineer", "25-001", "Client");
        let point = StructuralCheckPoint {
            labels: CheckPointLabels::new("B1", "N1", "E5", "K3"),
            ..Default::default()
        };

        let index = project.add_check_point(point.clone());
        assert_eq!(index, 0);
        assert_eq!(project.check_points.len(), 1);

        assert_eq!(project.remove_check_point(5), None);
        assert_eq!(project.remove_check_point(0), Some(point));
        assert!(project.check_points.is_empty());
    }

    #[test]
    fn test_material_from_table() {
        let mut project = FatigueProject::new("E", "J", "C");
        project.settings.steel_grade = "S 355".to_string();
        let material = project.material_constants(SteelTable::builtin()).unwrap();
        assert_eq!(material, MaterialConstants::new(345.0, 470.0));
    }

    #[test]
    fn test_material_override() {
        let mut project = FatigueProject::new("E", "J", "C");
        project.settings.steel_grade = "unknown".to_string();
        project.settings.material_override = Some(MaterialConstants::new(280.0, 440.0));
        let material = project.material_constants(SteelTable::builtin()).unwrap();
        assert_eq!(material.sigma_e, 280.0);
    }

    #[test]
    fn test_material_lookup_failure_is_fatal() {
        let mut project = FatigueProject::new("E", "J", "C");
        project.settings.thickness_limit_mm = 100.0;
        let err = project.evaluate(SteelTable::builtin()).unwrap_err();
        assert!(err.is_material_error());

        project.settings.steel_grade = "  ".to_string();
        assert_eq!(
            project.material_constants(SteelTable::builtin()).unwrap_err().error_code(),
            "MISSING_FIELD"
        );
    }

    #[test]
    fn test_invalid_thickness() {
        let mut project = FatigueProject::new("E", "J", "C");
        project.settings.thickness_limit_mm = -5.0;
        assert!(matches!(
            project.material_constants(SteelTable::builtin()),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_evaluate_uses_governing_setting() {
        let mut project = FatigueProject::new("E", "J", "C");
        project.settings.governing = Formulation::Ratio2;
        project.add_check_point(StructuralCheckPoint::default());
        let report = project.evaluate(SteelTable::builtin()).unwrap();
        assert_eq!(report.governing, Formulation::Ratio2);
        assert_eq!(report.results[0].validation.governing, Formulation::Ratio2);
    }
}
