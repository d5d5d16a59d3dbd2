//! # Permissible Axial Stress (FEM 2131/2132, 3-4.5.1.1)
//!
//! Permissible tensile and compressive stress for fatigue as a function of
//! the load-reversal ratio `k = sigma_min / sigma_max`.
//!
//! ## Formulae
//!
//! For `k <= 0` (alternating, the stress reverses through zero):
//!
//! ```text
//! sigma_t = 5 sigma_W / (3 - 2k)          capped at 0.66 sigma_E
//! sigma_c = 2 sigma_W / (1 - k)
//! ```
//!
//! For `k > 0` (pulsating, same sign over the cycle), interpolating between
//! `sigma_0 = 1.66 sigma_W` at `k = 0` and `sigma_+1 = 0.75 sigma_R` at `k = +1`:
//!
//! ```text
//! sigma_t = sigma_0 / (1 - (1 - sigma_0 / sigma_+1) k)   capped at 0.66 sigma_E
//! sigma_c = 1.2 sigma_t
//! ```
//!
//! Compressive permissible stresses are returned negative.
//!
//! ## Degenerate Inputs
//!
//! Nothing here returns an error. A zero `sigma_R` or a denominator of zero
//! produces a non-finite value that is passed on unchanged, so the ratio
//! check downstream fails the row. The cap never replaces a NaN.
//!
//! ## Example
//!
//! ```rust
//! use fatigue_core::calculations::axial::permissible_axis;
//! use fatigue_core::materials::MaterialConstants;
//!
//! let material = MaterialConstants::new(280.0, 440.0);
//! let axis = permissible_axis(60.0, -0.5, &material);
//! assert!((axis.tension - 75.0).abs() < 1e-9);
//! assert!((axis.compression + 80.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::check_point::StructuralCheckPoint;
use crate::materials::MaterialConstants;

/// sigma_0 = 1.66 sigma_W, tensile stress at k = 0
pub const K_ZERO_FACTOR: f64 = 1.66;

/// sigma_+1 = 0.75 sigma_R, tensile stress at k = +1
pub const K_ONE_FACTOR: f64 = 0.75;

/// Compression over tension for k > 0
pub const PULSATING_COMPRESSION_FACTOR: f64 = 1.2;

/// Which side of k = 0 a ratio falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalBranch {
    /// k <= 0: the stress changes sign over the cycle
    Alternating,
    /// k > 0: the stress keeps its sign over the cycle
    Pulsating,
}

impl ReversalBranch {
    /// Branch for a ratio. k = 0 is alternating.
    pub fn of(k: f64) -> Self {
        if k <= 0.0 {
            ReversalBranch::Alternating
        } else {
            ReversalBranch::Pulsating
        }
    }
}

/// Apply the 0.66 sigma_E cap.
///
/// Only a value strictly above the cap is replaced; NaN passes through.
pub fn cap_at_elastic_limit(sigma: f64, material: &MaterialConstants) -> f64 {
    let cap = material.permissible_cap();
    if sigma > cap {
        cap
    } else {
        sigma
    }
}

/// Tensile stress at k = 0
pub fn tensile_stress_k_0(sigma_w: f64) -> f64 {
    K_ZERO_FACTOR * sigma_w
}

/// Tensile stress at k = +1
pub fn tensile_stress_k_1(material: &MaterialConstants) -> f64 {
    K_ONE_FACTOR * material.sigma_r
}

/// Permissible tensile stress for k <= 0
pub fn tension_stress_k_neg(sigma_w: f64, k: f64, material: &MaterialConstants) -> f64 {
    let sigma_t = 5.0 * sigma_w / (3.0 - 2.0 * k);
    cap_at_elastic_limit(sigma_t, material)
}

/// Permissible tensile stress for k > 0
pub fn tension_stress_k_pos(sigma_w: f64, k: f64, material: &MaterialConstants) -> f64 {
    let sigma_0 = tensile_stress_k_0(sigma_w);
    let sigma_1 = tensile_stress_k_1(material);
    let sigma_t = sigma_0 / (1.0 - (1.0 - sigma_0 / sigma_1) * k);
    cap_at_elastic_limit(sigma_t, material)
}

/// Magnitude of the permissible compressive stress for k <= 0 (uncapped)
pub fn compression_stress_k_neg(sigma_w: f64, k: f64) -> f64 {
    2.0 * sigma_w / (1.0 - k)
}

/// Magnitude of the permissible compressive stress for k > 0
pub fn compression_stress_k_pos(sigma_w: f64, k: f64, material: &MaterialConstants) -> f64 {
    PULSATING_COMPRESSION_FACTOR * tension_stress_k_pos(sigma_w, k, material)
}

/// Permissible tensile stress for any k
pub fn tension_stress(sigma_w: f64, k: f64, material: &MaterialConstants) -> f64 {
    match ReversalBranch::of(k) {
        ReversalBranch::Alternating => tension_stress_k_neg(sigma_w, k, material),
        ReversalBranch::Pulsating => tension_stress_k_pos(sigma_w, k, material),
    }
}

/// Permissible compressive stress for any k, negative
pub fn compression_stress(sigma_w: f64, k: f64, material: &MaterialConstants) -> f64 {
    let magnitude = match ReversalBranch::of(k) {
        ReversalBranch::Alternating => compression_stress_k_neg(sigma_w, k),
        ReversalBranch::Pulsating => compression_stress_k_pos(sigma_w, k, material),
    };
    -magnitude
}

/// Tension/compression pair for one stress axis (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPermissibleStress {
    /// Permissible tensile stress (>= 0)
    pub tension: f64,
    /// Permissible compressive stress (<= 0)
    pub compression: f64,
}

/// Permissible stresses for one axis with basic stress `sigma_w` and ratio `k`
pub fn permissible_axis(sigma_w: f64, k: f64, material: &MaterialConstants) -> AxisPermissibleStress {
    AxisPermissibleStress {
        tension: tension_stress(sigma_w, k, material),
        compression: compression_stress(sigma_w, k, material),
    }
}

/// Permissible stresses for both normal stress axes of a check point.
///
/// Returns `(x, y)`, using `k_sx` and `k_sy` respectively.
pub fn calculate(
    point: &StructuralCheckPoint,
    material: &MaterialConstants,
) -> (AxisPermissibleStress, AxisPermissibleStress) {
    let basic = &point.basic;
    (
        permissible_axis(basic.sigma_w, basic.k_sx, material),
        permissible_axis(basic.sigma_w, basic.k_sy, material),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::check_point::{BasicStresses, CheckPointLabels, MeasuredStresses};

    const TOL: f64 = 1e-9;

    fn material() -> MaterialConstants {
        MaterialConstants::new(280.0, 440.0)
    }

    #[test]
    fn test_branch_selection() {
        assert_eq!(ReversalBranch::of(-1.0), ReversalBranch::Alternating);
        assert_eq!(ReversalBranch::of(0.0), ReversalBranch::Alternating);
        assert_eq!(ReversalBranch::of(1e-12), ReversalBranch::Pulsating);
        assert_eq!(ReversalBranch::of(1.0), ReversalBranch::Pulsating);
    }

    #[test]
    fn test_tension_k_neg_scenario() {
        // 5 * 60 / (3 + 1) = 75, below 0.66 * 280 = 184.8
        let sigma_t = tension_stress(60.0, -0.5, &material());
        assert!((sigma_t - 75.0).abs() < TOL);
    }

    #[test]
    fn test_tension_k_neg_matches_capped_formula() {
        let mat = material();
        for sigma_w in [27.0, 60.0, 84.0, 150.0] {
            for i in 0..=20 {
                let k = -1.0 + 0.05 * i as f64;
                let expected = (5.0 * sigma_w / (3.0 - 2.0 * k)).min(mat.permissible_cap());
                assert!((tension_stress(sigma_w, k, &mat) - expected).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_cap_applies() {
        // 5 * 150 / 3 = 250 > 184.8
        let sigma_t = tension_stress(150.0, 0.0, &material());
        assert!((sigma_t - 184.8).abs() < TOL);
    }

    #[test]
    fn test_continuity_at_k_zero() {
        let mat = material();
        let sigma_w = 60.0;
        // 5/3 rounds to 1.66 in the standard; both branches agree within that rounding
        let at_zero = tension_stress(sigma_w, 0.0, &mat);
        assert!((at_zero - 5.0 * sigma_w / 3.0).abs() < TOL);
        assert!((at_zero - tensile_stress_k_0(sigma_w)).abs() < 0.01 * sigma_w);

        let just_above = tension_stress(sigma_w, 1e-12, &mat);
        assert!((just_above - tensile_stress_k_0(sigma_w)).abs() < 1e-6);
    }

    #[test]
    fn test_k_one_anchor() {
        let mat = MaterialConstants::new(355.0, 250.0);
        // sigma_+1 = 0.75 * 250 = 187.5 < cap 234.3
        let sigma_t = tension_stress(60.0, 1.0, &mat);
        assert!((sigma_t - 187.5).abs() < TOL);

        // With the scenario material the anchor 330 is above the cap
        let capped = tension_stress(60.0, 1.0, &material());
        assert!((capped - 184.8).abs() < TOL);
    }

    #[test]
    fn test_compression_k_neg_uncapped() {
        // 2 * 60 / (1 + 0.5) = 80
        let sigma_c = compression_stress(60.0, -0.5, &material());
        assert!((sigma_c + 80.0).abs() < TOL);

        // Fully reversed compression is not capped: 2 * 200 / 2 = 200 > 184.8
        let big = compression_stress(200.0, -1.0, &material());
        assert!((big + 200.0).abs() < TOL);
    }

    #[test]
    fn test_compression_k_pos() {
        let mat = material();
        let k = 0.4;
        let expected = -1.2 * tension_stress_k_pos(60.0, k, &mat);
        assert!((compression_stress(60.0, k, &mat) - expected).abs() < TOL);
    }

    #[test]
    fn test_sign_invariant() {
        let mat = material();
        for sigma_w in [27.0, 45.0, 84.0] {
            for i in 0..=40 {
                let k = -1.0 + 0.05 * i as f64;
                let axis = permissible_axis(sigma_w, k, &mat);
                assert!(axis.tension >= 0.0, "tension negative at k = {}", k);
                assert!(axis.compression <= 0.0, "compression positive at k = {}", k);
            }
        }
    }

    #[test]
    fn test_degenerate_sigma_r_is_not_clamped_to_a_pass() {
        let mat = MaterialConstants::new(280.0, 0.0);
        // sigma_0 / sigma_1 = inf, the interpolation collapses to zero
        let sigma_t = tension_stress(60.0, 0.5, &mat);
        assert_eq!(sigma_t, 0.0);

        // 0 / 0 stays NaN instead of becoming the cap
        let nan = tension_stress(0.0, 0.5, &mat);
        assert!(nan.is_nan());
    }

    #[test]
    fn test_calculate_uses_axis_ratios() {
        let point = StructuralCheckPoint::new(
            CheckPointLabels::new("B1", "N1", "E5", "K0"),
            MeasuredStresses::default(),
            BasicStresses {
                sigma_w: 60.0,
                sigma_w0: 120.0,
                k_sx: -0.5,
                k_sy: 0.3,
                k_txy: 0.0,
            },
        );
        let mat = material();
        let (x, y) = calculate(&point, &mat);
        assert_eq!(x, permissible_axis(60.0, -0.5, &mat));
        assert_eq!(y, permissible_axis(60.0, 0.3, &mat));
    }
}
