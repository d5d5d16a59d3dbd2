//! # Fatigue Batch
//!
//! A batch is the set of check points of one run together with the material
//! constants they share. It is immutable once built; evaluating it runs the
//! full pipeline on every row and collects the results into a
//! [`BatchReport`].
//!
//! Rows are independent. A row whose ratios are non-finite or whose
//! `ratio_2` is undefined is reported and fails; it does not stop the
//! remaining rows from being evaluated.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::calculations::batch::FatigueBatch;
//! use fatigue_core::calculations::check_point::StructuralCheckPoint;
//! use fatigue_core::calculations::validator::Formulation;
//! use fatigue_core::materials::MaterialConstants;
//!
//! let batch = FatigueBatch::new(
//!     MaterialConstants::new(225.0, 360.0),
//!     vec![StructuralCheckPoint::default()],
//! );
//! let report = batch.evaluate(Formulation::Ratio1);
//! assert_eq!(report.summary.total, 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_point::{CheckPointLabels, MeasuredStresses, StructuralCheckPoint};
use super::combined::{self, CombinedRatios};
use super::validator::{self, Formulation, Validation};
use super::{permissible_stresses, PermissibleStressResult};
use crate::materials::MaterialConstants;

/// Immutable set of check points sharing one set of material constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueBatch {
    material: MaterialConstants,
    points: Vec<StructuralCheckPoint>,
}

impl FatigueBatch {
    pub fn new(material: MaterialConstants, points: Vec<StructuralCheckPoint>) -> Self {
        FatigueBatch { material, points }
    }

    pub fn material(&self) -> MaterialConstants {
        self.material
    }

    pub fn points(&self) -> &[StructuralCheckPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Stages 1 and 2 only, one result per row in batch order
    pub fn permissible_stresses(&self) -> Vec<PermissibleStressResult> {
        self.points
            .iter()
            .map(|p| permissible_stresses(p, &self.material))
            .collect()
    }

    /// Run the full pipeline on every row.
    pub fn evaluate(&self, governing: Formulation) -> BatchReport {
        let results: Vec<CheckPointResult> = self
            .points
            .iter()
            .map(|p| evaluate_point(p, &self.material, governing))
            .collect();

        let summary = BatchSummary::from_results(&results, governing);
        tracing::info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            not_computable = summary.not_computable,
            non_finite = summary.non_finite,
            out_of_range_k = summary.out_of_range_k,
            "fatigue batch evaluated"
        );

        BatchReport {
            run_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            material: self.material,
            governing,
            results,
            summary,
        }
    }
}

/// Everything computed for one check point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckPointResult {
    pub labels: CheckPointLabels,
    pub measured: MeasuredStresses,
    pub permissible: PermissibleStressResult,
    pub ratios: CombinedRatios,
    pub validation: Validation,
    /// Load-reversal ratios outside [-1, 1], by field name
    #[serde(default)]
    pub out_of_range_k: Vec<String>,
}

impl CheckPointResult {
    /// False when ratio_2 is undefined (ratio_1 < 0)
    pub fn is_computable(&self) -> bool {
        self.ratios.ratio_2.is_defined()
    }

    pub fn passes(&self) -> bool {
        self.validation.passes()
    }

    /// True when a load-reversal ratio lies outside [-1, 1]; the permissible
    /// stresses of such a row may be meaningless
    pub fn has_out_of_range_k(&self) -> bool {
        !self.out_of_range_k.is_empty()
    }
}

/// Evaluate one check point through all four stages
pub fn evaluate_point(
    point: &StructuralCheckPoint,
    material: &MaterialConstants,
    governing: Formulation,
) -> CheckPointResult {
    let out_of_range = point.basic.out_of_range_ratios();
    for &(field, k) in &out_of_range {
        tracing::warn!(labels = %point.labels, field, k, "load-reversal ratio outside [-1, 1]");
    }

    let permissible = permissible_stresses(point, material);
    let ratios = combined::calculate(&point.measured, &permissible);
    let validation = validator::validate(&ratios, governing);

    if !ratios.ratio_2.is_defined() {
        tracing::warn!(labels = %point.labels, ratio_1 = ratios.ratio_1, "ratio_2 undefined, ratio_1 is negative");
    } else if !ratios.is_finite() {
        tracing::warn!(labels = %point.labels, "non-finite ratio, check point fails");
    }

    tracing::debug!(
        labels = %point.labels,
        ratio_1 = ratios.ratio_1,
        ratio_2 = %ratios.ratio_2,
        verdict = %validation.verdict,
        "check point evaluated"
    );

    CheckPointResult {
        labels: point.labels.clone(),
        measured: point.measured,
        permissible,
        ratios,
        validation,
        out_of_range_k: out_of_range.into_iter().map(|(field, _)| field.to_string()).collect(),
    }
}

/// Row with the highest governing ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningRow {
    /// Position in the batch
    pub index: usize,
    pub labels: CheckPointLabels,
    pub ratio: f64,
}

/// Counts over a batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Rows whose ratio_2 is undefined
    pub not_computable: usize,
    /// Rows with at least one non-finite ratio
    pub non_finite: usize,
    /// Rows with a load-reversal ratio outside [-1, 1]
    #[serde(default)]
    pub out_of_range_k: usize,
    /// Highest finite governing ratio, if any row has one
    pub governing_row: Option<GoverningRow>,
}

impl BatchSummary {
    pub fn from_results(results: &[CheckPointResult], governing: Formulation) -> Self {
        let passed = results.iter().filter(|r| r.passes()).count();
        let not_computable = results.iter().filter(|r| !r.is_computable()).count();
        let non_finite = results.iter().filter(|r| !r.ratios.is_finite()).count();
        let out_of_range_k = results.iter().filter(|r| r.has_out_of_range_k()).count();

        let governing_row = results
            .iter()
            .enumerate()
            .filter_map(|(index, r)| {
                governing
                    .ratio(&r.ratios)
                    .filter(|ratio| ratio.is_finite())
                    .map(|ratio| (index, r, ratio))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(index, r, ratio)| GoverningRow {
                index,
                labels: r.labels.clone(),
                ratio,
            });

        BatchSummary {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            not_computable,
            non_finite,
            out_of_range_k,
            governing_row,
        }
    }
}

/// Result of one batch evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub material: MaterialConstants,
    pub governing: Formulation,
    pub results: Vec<CheckPointResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// True when every check point passes
    pub fn passes(&self) -> bool {
        self.summary.failed == 0
    }

    /// Failing check points in batch order
    pub fn failures(&self) -> impl Iterator<Item = &CheckPointResult> {
        self.results.iter().filter(|r| !r.passes())
    }
}
