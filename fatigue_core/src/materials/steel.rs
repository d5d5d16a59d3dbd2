//! Structural Steel Grades (EN 10025-2)
//!
//! Elastic limit `fy` and ultimate tensile strength `fu` for hot-rolled
//! structural steel, keyed by grade and nominal thickness limit.
//!
//! ## Grade Names
//!
//! Grades are written the way they appear on drawings: `"S 235"`, `"S235"`,
//! and the withdrawn EN 10025:1990 names `"Fe 360"`, `"Fe 430"`, `"Fe 510"`
//! which map onto S 235, S 275 and S 355 respectively.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::materials::steel::SteelTable;
//!
//! let table = SteelTable::builtin();
//! let constants = table.resolve("Fe 510", 40.0).unwrap();
//! assert_eq!(constants.sigma_e, 345.0);
//! assert_eq!(constants.sigma_r, 470.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::MaterialConstants;
use crate::errors::{CalcError, CalcResult};

/// Default nominal thickness limit (mm) used to pick the table row
pub const DEFAULT_THICKNESS_LIMIT_MM: f64 = 40.0;

/// Structural steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    #[serde(rename = "S 235")]
    S235,
    #[serde(rename = "S 275")]
    S275,
    #[serde(rename = "S 355")]
    S355,
    #[serde(rename = "S 450")]
    S450,
}

impl SteelGrade {
    /// All grades for iteration
    pub const ALL: [SteelGrade; 4] = [
        SteelGrade::S235,
        SteelGrade::S275,
        SteelGrade::S355,
        SteelGrade::S450,
    ];

    /// Parse from common string representations.
    ///
    /// Spaces, underscores and dashes are ignored, so `"S 235"`, `"s235"`
    /// and `"S-235"` are the same grade. Legacy `Fe` names resolve to their
    /// current equivalent.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "S235" | "FE360" => Ok(SteelGrade::S235),
            "S275" | "FE430" => Ok(SteelGrade::S275),
            "S355" | "FE510" => Ok(SteelGrade::S355),
            "S450" => Ok(SteelGrade::S450),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name (e.g., "S 235")
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::S235 => "S 235",
            SteelGrade::S275 => "S 275",
            SteelGrade::S355 => "S 355",
            SteelGrade::S450 => "S 450",
        }
    }

    /// Designation used by legacy structural steel databases (e.g., "Fe360").
    ///
    /// S 450 has no EN 10025:1990 counterpart.
    pub fn legacy_designation(&self) -> Option<&'static str> {
        match self {
            SteelGrade::S235 => Some("Fe360"),
            SteelGrade::S275 => Some("Fe430"),
            SteelGrade::S355 => Some("Fe510"),
            SteelGrade::S450 => None,
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the steel table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelValues {
    /// Steel grade
    pub grade: SteelGrade,

    /// Upper bound of the nominal thickness band (mm)
    pub t_max_mm: f64,

    /// Elastic limit fy (MPa)
    pub fy_mpa: f64,

    /// Ultimate tensile strength fu (MPa)
    pub fu_mpa: f64,
}

impl SteelValues {
    /// Material constants for the fatigue check
    pub fn constants(&self) -> MaterialConstants {
        MaterialConstants::new(self.fy_mpa, self.fu_mpa)
    }
}

impl std::fmt::Display for SteelValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (t <= {} mm): fy = {} MPa, fu = {} MPa",
            self.grade, self.t_max_mm, self.fy_mpa, self.fu_mpa
        )
    }
}

/// Built-in table, thickness bands t <= 16, 40 and 63 mm
static BUILTIN_TABLE: Lazy<SteelTable> = Lazy::new(|| {
    let rows = [
        // (grade, t_max_mm, fy_mpa, fu_mpa)
        (SteelGrade::S235, 16.0, 235.0, 360.0),
        (SteelGrade::S235, 40.0, 225.0, 360.0),
        (SteelGrade::S235, 63.0, 215.0, 360.0),
        (SteelGrade::S275, 16.0, 275.0, 410.0),
        (SteelGrade::S275, 40.0, 265.0, 410.0),
        (SteelGrade::S275, 63.0, 255.0, 410.0),
        (SteelGrade::S355, 16.0, 355.0, 470.0),
        (SteelGrade::S355, 40.0, 345.0, 470.0),
        (SteelGrade::S355, 63.0, 335.0, 470.0),
        (SteelGrade::S450, 16.0, 450.0, 550.0),
        (SteelGrade::S450, 40.0, 430.0, 550.0),
        (SteelGrade::S450, 63.0, 410.0, 550.0),
    ];

    let mut table = SteelTable::new();
    for (grade, t_max_mm, fy_mpa, fu_mpa) in rows {
        table.insert(SteelValues {
            grade,
            t_max_mm,
            fy_mpa,
            fu_mpa,
        });
    }
    table
});

/// Steel grade table.
///
/// Rows are kept in insertion order. The table does not deduplicate:
/// a lookup that hits more than one row is reported as ambiguous rather
/// than silently picking one of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteelTable {
    rows: Vec<SteelValues>,
}

impl SteelTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared built-in table
    pub fn builtin() -> &'static SteelTable {
        &BUILTIN_TABLE
    }

    /// Append a row
    pub fn insert(&mut self, values: SteelValues) {
        self.rows.push(values);
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[SteelValues] {
        &self.rows
    }

    /// Rows for one grade
    pub fn rows_for(&self, grade: SteelGrade) -> Vec<&SteelValues> {
        self.rows.iter().filter(|r| r.grade == grade).collect()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up the single row for a grade and thickness limit.
    ///
    /// # Returns
    ///
    /// * `Ok(&SteelValues)` - exactly one row matches
    /// * `Err(CalcError::MaterialNotFound)` - unknown grade or no row
    /// * `Err(CalcError::AmbiguousMaterial)` - more than one row matches
    pub fn lookup(&self, grade_name: &str, t_max_mm: f64) -> CalcResult<&SteelValues> {
        let grade = SteelGrade::from_str_flexible(grade_name)?;
        let key = format!("{} (t_max = {} mm)", grade, t_max_mm);

        let mut matches = self
            .rows
            .iter()
            .filter(|r| r.grade == grade && r.t_max_mm == t_max_mm);

        match (matches.next(), matches.count()) {
            (Some(values), 0) => Ok(values),
            (Some(_), extra) => Err(CalcError::ambiguous_material(key, extra + 1)),
            (None, _) => Err(CalcError::material_not_found(key)),
        }
    }

    /// Resolve a grade name to the material constants of the fatigue check
    pub fn resolve(&self, grade_name: &str, t_max_mm: f64) -> CalcResult<MaterialConstants> {
        let values = self.lookup(grade_name, t_max_mm)?;
        tracing::debug!(%values, "resolved steel grade");
        Ok(values.constants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("S 235").unwrap(), SteelGrade::S235);
        assert_eq!(SteelGrade::from_str_flexible("s275").unwrap(), SteelGrade::S275);
        assert_eq!(SteelGrade::from_str_flexible("S-355").unwrap(), SteelGrade::S355);
        assert!(SteelGrade::from_str_flexible("S 999").is_err());
    }

    #[test]
    fn test_legacy_names() {
        assert_eq!(SteelGrade::from_str_flexible("Fe 360").unwrap(), SteelGrade::S235);
        assert_eq!(SteelGrade::from_str_flexible("Fe 430").unwrap(), SteelGrade::S275);
        assert_eq!(SteelGrade::from_str_flexible("Fe 510").unwrap(), SteelGrade::S355);

        assert_eq!(SteelGrade::S235.legacy_designation(), Some("Fe360"));
        assert_eq!(SteelGrade::S355.legacy_designation(), Some("Fe510"));
        assert_eq!(SteelGrade::S450.legacy_designation(), None);
    }

    #[test]
    fn test_builtin_lookup() {
        let table = SteelTable::builtin();
        assert_eq!(table.len(), 12);

        let s235 = table.lookup("S 235", DEFAULT_THICKNESS_LIMIT_MM).unwrap();
        assert_eq!(s235.fy_mpa, 225.0);
        assert_eq!(s235.fu_mpa, 360.0);

        let thin = table.lookup("S 355", 16.0).unwrap();
        assert_eq!(thin.fy_mpa, 355.0);
    }

    #[test]
    fn test_resolve_constants() {
        let constants = SteelTable::builtin().resolve("Fe 430", 40.0).unwrap();
        assert_eq!(constants.sigma_e, 265.0);
        assert_eq!(constants.sigma_r, 410.0);
    }

    #[test]
    fn test_no_matching_thickness() {
        let result = SteelTable::builtin().lookup("S 235", 100.0);
        assert!(matches!(result, Err(CalcError::MaterialNotFound { .. })));
    }

    #[test]
    fn test_unknown_grade() {
        let result = SteelTable::builtin().resolve("A992", 40.0);
        assert!(matches!(result, Err(CalcError::MaterialNotFound { .. })));
    }

    #[test]
    fn test_duplicate_rows_are_ambiguous() {
        let mut table = SteelTable::new();
        let row = SteelValues {
            grade: SteelGrade::S235,
            t_max_mm: 40.0,
            fy_mpa: 225.0,
            fu_mpa: 360.0,
        };
        table.insert(row);
        table.insert(SteelValues { fy_mpa: 235.0, ..row });

        match table.lookup("S 235", 40.0) {
            Err(CalcError::AmbiguousMaterial { matches, .. }) => assert_eq!(matches, 2),
            other => panic!("expected ambiguous material, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_for_grade() {
        let rows = SteelTable::builtin().rows_for(SteelGrade::S450);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.fu_mpa == 550.0));
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::S355).unwrap();
        assert_eq!(json, "\"S 355\"");
        let roundtrip: SteelGrade = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, SteelGrade::S355);
    }

    #[test]
    fn test_values_display() {
        let values = SteelTable::builtin().lookup("S 275", 16.0).unwrap();
        let display = format!("{}", values);
        assert!(display.contains("S 275"));
        assert!(display.contains("275"));
        assert!(display.contains("410"));
    }
}
