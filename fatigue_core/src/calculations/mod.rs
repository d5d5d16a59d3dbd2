//! # Fatigue Calculations
//!
//! The FEM 2131/2132 fatigue check as an explicit pipeline of pure stages,
//! each evaluated row by row:
//!
//! 1. [`axial`] - permissible tensile/compressive stress per axis
//! 2. [`shear`] - permissible shear stress
//! 3. [`combined`] - utilization ratios and the two combined ratios
//! 4. [`validator`] - verdict against the acceptance limits
//!
//! [`batch`] runs the pipeline over a whole set of check points sharing one
//! set of material constants.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::calculations::{permissible_stresses, combined, validator};
//! use fatigue_core::calculations::check_point::{
//!     BasicStresses, CheckPointLabels, MeasuredStresses, StructuralCheckPoint,
//! };
//! use fatigue_core::materials::MaterialConstants;
//!
//! let material = MaterialConstants::new(280.0, 440.0);
//! let point = StructuralCheckPoint::new(
//!     CheckPointLabels::new("B1", "N1", "E5", "K3"),
//!     MeasuredStresses { sigma_x_max: 50.0, sigma_y_max: -10.0, tau_xy_max: 2.0 },
//!     BasicStresses { sigma_w: 60.0, sigma_w0: 120.0, k_sx: -0.5, k_sy: -1.0, k_txy: -1.0 },
//! );
//!
//! let permissible = permissible_stresses(&point, &material);
//! let ratios = combined::calculate(&point.measured, &permissible);
//! let validation = validator::validate(&ratios, validator::Formulation::Ratio1);
//! assert!(validation.passes());
//! ```

pub mod axial;
pub mod batch;
pub mod check_point;
pub mod combined;
mod non_finite;
pub mod shear;
pub mod validator;

use serde::{Deserialize, Serialize};

use crate::materials::MaterialConstants;

// Re-export commonly used types
pub use batch::{BatchReport, BatchSummary, CheckPointResult, FatigueBatch};
pub use check_point::{BasicStresses, CheckPointLabels, MeasuredStresses, StructuralCheckPoint};
pub use combined::{CombinedRatios, RootRatio, SelectedPermissible, StressSense};
pub use validator::{Formulation, Validation, Verdict};

/// Permissible stresses of one check point (MPa).
///
/// Tension values are non-negative, compression values non-positive, for
/// load-reversal ratios within [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PermissibleStressResult {
    /// Permissible tensile stress, x axis
    #[serde(with = "non_finite")]
    pub sigma_tx: f64,
    /// Permissible compressive stress, x axis
    #[serde(with = "non_finite")]
    pub sigma_cx: f64,
    /// Permissible tensile stress, y axis
    #[serde(with = "non_finite")]
    pub sigma_ty: f64,
    /// Permissible compressive stress, y axis
    #[serde(with = "non_finite")]
    pub sigma_cy: f64,
    /// Permissible shear stress
    #[serde(with = "non_finite")]
    pub tau_a: f64,
}

/// Stages 1 and 2: permissible stresses of a check point
pub fn permissible_stresses(
    point: &StructuralCheckPoint,
    material: &MaterialConstants,
) -> PermissibleStressResult {
    let (x, y) = axial::calculate(point, material);
    let tau_a = shear::calculate(point, material);

    PermissibleStressResult {
        sigma_tx: x.tension,
        sigma_cx: x.compression,
        sigma_ty: y.tension,
        sigma_cy: y.compression,
        tau_a,
    }
}
