//! # Combined Stress Ratios (FEM 2131/2132, 3-4.5.1.3)
//!
//! Fuses the measured maximum stresses of a check point with its permissible
//! stresses into utilization ratios.
//!
//! ## Formulae
//!
//! ```text
//! ratio_s_x  = sigma_x_max / sigma_xa
//! ratio_s_y  = sigma_y_max / sigma_ya
//! ratio_t_xy = |tau_xy_max| / tau_a
//! cross      = sigma_x_max sigma_y_max / |sigma_xa sigma_ya|
//!
//! ratio_1 = ratio_s_x^2 + ratio_s_y^2 - cross + ratio_t_xy^2     formula (5)
//! ratio_2 = sqrt(ratio_1)                                       footnote (1)
//! ```
//!
//! `sigma_xa` is the tensile permissible stress when `sigma_x_max >= 0` and
//! the compressive one otherwise; likewise for y. The cross term keeps the
//! sign of the numerator: same-sign biaxial stresses relieve the interaction,
//! opposite signs add to it.
//!
//! `ratio_1` can be negative when the cross term dominates. Its square root
//! is then [`RootRatio::Undefined`], never zero or NaN.

use serde::{Deserialize, Serialize};

use super::check_point::MeasuredStresses;
use super::PermissibleStressResult;

/// Whether a measured normal stress is tension or compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressSense {
    /// sigma_max >= 0
    Tension,
    /// sigma_max < 0
    Compression,
}

impl StressSense {
    /// Sense of a measured maximum. Zero counts as tension.
    pub fn of(sigma_max: f64) -> Self {
        if sigma_max >= 0.0 {
            StressSense::Tension
        } else {
            StressSense::Compression
        }
    }
}

/// The permissible stress picked for an axis, tagged with why it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPermissible {
    pub sense: StressSense,
    /// Permissible stress (MPa), negative for compression
    #[serde(with = "super::non_finite")]
    pub value: f64,
}

impl SelectedPermissible {
    /// Pick the tensile or compressive permissible stress by the sign of `sigma_max`
    pub fn select(sigma_max: f64, tension: f64, compression: f64) -> Self {
        let sense = StressSense::of(sigma_max);
        let value = match sense {
            StressSense::Tension => tension,
            StressSense::Compression => compression,
        };
        SelectedPermissible { sense, value }
    }
}

/// Square root of `ratio_1`, undefined for negative `ratio_1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RootRatio {
    Defined(#[serde(with = "super::non_finite")] f64),
    /// ratio_1 < 0, the square root does not exist
    Undefined,
}

impl RootRatio {
    pub fn from_ratio_1(ratio_1: f64) -> Self {
        if ratio_1 < 0.0 {
            RootRatio::Undefined
        } else {
            RootRatio::Defined(ratio_1.sqrt())
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            RootRatio::Defined(v) => Some(*v),
            RootRatio::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RootRatio::Defined(_))
    }
}

impl std::fmt::Display for RootRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootRatio::Defined(v) => write!(f, "{:.4}", v),
            RootRatio::Undefined => write!(f, "undefined"),
        }
    }
}

/// Utilization ratio of one normal stress axis
pub fn axis_ratio(sigma_max: f64, selected: &SelectedPermissible) -> f64 {
    sigma_max / selected.value
}

/// Utilization ratio of the shear stress
pub fn shear_ratio(tau_xy_max: f64, tau_a: f64) -> f64 {
    tau_xy_max.abs() / tau_a
}

/// Biaxial cross term; the absolute value applies to the denominator only
pub fn cross_term(
    sigma_x_max: f64,
    sigma_y_max: f64,
    selected_x: &SelectedPermissible,
    selected_y: &SelectedPermissible,
) -> f64 {
    sigma_x_max * sigma_y_max / (selected_x.value * selected_y.value).abs()
}

/// ratio_1, formula (5)
pub fn interaction_ratio(ratio_s_x: f64, ratio_s_y: f64, cross_term: f64, ratio_t_xy: f64) -> f64 {
    ratio_s_x.powi(2) + ratio_s_y.powi(2) - cross_term + ratio_t_xy.powi(2)
}

/// Ratios of one check point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedRatios {
    /// Permissible stress used for sigma_x
    pub selected_x: SelectedPermissible,
    /// Permissible stress used for sigma_y
    pub selected_y: SelectedPermissible,
    #[serde(with = "super::non_finite")]
    pub ratio_s_x: f64,
    #[serde(with = "super::non_finite")]
    pub ratio_s_y: f64,
    #[serde(with = "super::non_finite")]
    pub ratio_t_xy: f64,
    #[serde(with = "super::non_finite")]
    pub cross_term: f64,
    /// Combined ratio, formula (5); acceptable up to 1.0
    #[serde(with = "super::non_finite")]
    pub ratio_1: f64,
    /// Square root of ratio_1; acceptable up to 1.05
    pub ratio_2: RootRatio,
}

impl CombinedRatios {
    /// Whether every computed ratio is a finite number
    pub fn is_finite(&self) -> bool {
        [self.ratio_s_x, self.ratio_s_y, self.ratio_t_xy, self.cross_term, self.ratio_1]
            .iter()
            .all(|r| r.is_finite())
            && self.ratio_2.value().map_or(true, f64::is_finite)
    }
}

/// Combine measured stresses and permissible stresses into ratios.
///
/// Pure: the same inputs always give the same ratios.
pub fn calculate(measured: &MeasuredStresses, permissible: &PermissibleStressResult) -> CombinedRatios {
    let selected_x = SelectedPermissible::select(measured.sigma_x_max, permissible.sigma_tx, permissible.sigma_cx);
    let selected_y = SelectedPermissible::select(measured.sigma_y_max, permissible.sigma_ty, permissible.sigma_cy);

    let ratio_s_x = axis_ratio(measured.sigma_x_max, &selected_x);
    let ratio_s_y = axis_ratio(measured.sigma_y_max, &selected_y);
    let ratio_t_xy = shear_ratio(measured.tau_xy_max, permissible.tau_a);
    let cross = cross_term(measured.sigma_x_max, measured.sigma_y_max, &selected_x, &selected_y);

    let ratio_1 = interaction_ratio(ratio_s_x, ratio_s_y, cross, ratio_t_xy);

    CombinedRatios {
        selected_x,
        selected_y,
        ratio_s_x,
        ratio_s_y,
        ratio_t_xy,
        cross_term: cross,
        ratio_1,
        ratio_2: RootRatio::from_ratio_1(ratio_1),
    }
}
