//! # Fatigue Check Validation
//!
//! Acceptance criteria of FEM 2131/2132, 3-4.5.1.3:
//!
//! - formula (5): `ratio_1 <= 1.0`
//! - footnote (1): `ratio_2 = sqrt(ratio_1) <= 1.05`
//!
//! A ratio passes only when it is a finite number within its limit. A
//! non-finite ratio or an undefined `ratio_2` always fails.

use serde::{Deserialize, Serialize};

use super::combined::{CombinedRatios, RootRatio};

/// Acceptance limit of ratio_1
pub const RATIO_1_LIMIT: f64 = 1.0;

/// Acceptance limit of ratio_2
pub const RATIO_2_LIMIT: f64 = 1.05;

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    fn from_bool(ok: bool) -> Self {
        if ok {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn passes(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Which combined ratio decides the verdict of a check point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Formulation {
    /// ratio_1 <= 1.0, formula (5)
    #[default]
    #[serde(rename = "ratio_1")]
    Ratio1,
    /// ratio_2 <= 1.05, footnote (1)
    #[serde(rename = "ratio_2")]
    Ratio2,
}

impl Formulation {
    /// Acceptance limit of this formulation
    pub fn limit(&self) -> f64 {
        match self {
            Formulation::Ratio1 => RATIO_1_LIMIT,
            Formulation::Ratio2 => RATIO_2_LIMIT,
        }
    }

    /// The governing ratio value in `ratios`, None when undefined
    pub fn ratio(&self, ratios: &CombinedRatios) -> Option<f64> {
        match self {
            Formulation::Ratio1 => Some(ratios.ratio_1),
            Formulation::Ratio2 => ratios.ratio_2.value(),
        }
    }
}

impl std::fmt::Display for Formulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formulation::Ratio1 => write!(f, "ratio_1 <= {}", RATIO_1_LIMIT),
            Formulation::Ratio2 => write!(f, "ratio_2 <= {}", RATIO_2_LIMIT),
        }
    }
}

/// Verdicts of one check point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// ratio_1 against 1.0
    pub ratio_1: Verdict,
    /// ratio_2 against 1.05
    pub ratio_2: Verdict,
    /// Formulation the verdict is taken from
    pub governing: Formulation,
    /// Verdict of the check point
    pub verdict: Verdict,
}

impl Validation {
    pub fn passes(&self) -> bool {
        self.verdict.passes()
    }
}

/// Check ratio_1 against its limit
pub fn check_ratio_1(ratio_1: f64) -> Verdict {
    Verdict::from_bool(ratio_1.is_finite() && ratio_1 <= RATIO_1_LIMIT)
}

/// Check ratio_2 against its limit; undefined fails
pub fn check_ratio_2(ratio_2: RootRatio) -> Verdict {
    match ratio_2 {
        RootRatio::Defined(v) => Verdict::from_bool(v.is_finite() && v <= RATIO_2_LIMIT),
        RootRatio::Undefined => Verdict::Fail,
    }
}

/// Validate the combined ratios of a check point
pub fn validate(ratios: &CombinedRatios, governing: Formulation) -> Validation {
    let ratio_1 = check_ratio_1(ratios.ratio_1);
    let ratio_2 = check_ratio_2(ratios.ratio_2);
    let verdict = match governing {
        Formulation::Ratio1 => ratio_1,
        Formulation::Ratio2 => ratio_2,
    };

    Validation {
        ratio_1,
        ratio_2,
        governing,
        verdict,
    }
}
