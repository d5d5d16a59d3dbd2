//! # Permissible Shear Stress (FEM 2131/2132, 3-4.5.1.2)
//!
//! The shear permissible stress follows the tensile law of
//! [`axial`](super::axial) with the shear basic stress `sigma_W0` and the
//! ratio `k_txy`, then converts the result to shear with the von Mises
//! factor:
//!
//! ```text
//! tau_a = sigma_t(sigma_W0, k_txy) / sqrt(3)
//! ```
//!
//! The reference points of the k > 0 branch are `1.66 sigma_W0` and
//! `0.75 sigma_R`. There is no compressive branch.

use super::axial;
use super::check_point::StructuralCheckPoint;
use crate::materials::MaterialConstants;

/// Permissible shear stress tau_a for basic stress `sigma_w0` and ratio `k` (MPa)
pub fn shear_stress(sigma_w0: f64, k: f64, material: &MaterialConstants) -> f64 {
    axial::tension_stress(sigma_w0, k, material) / 3f64.sqrt()
}

/// Permissible shear stress of a check point
pub fn calculate(point: &StructuralCheckPoint, material: &MaterialConstants) -> f64 {
    shear_stress(point.basic.sigma_w0, point.basic.k_txy, material)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn material() -> MaterialConstants {
        MaterialConstants::new(280.0, 440.0)
    }

    #[test]
    fn test_fully_reversed_shear() {
        // sigma_t = 5 * 30 / 5 = 30, tau_a = 30 / sqrt(3)
        let tau_a = shear_stress(30.0, -1.0, &material());
        assert!((tau_a - 30.0 / 3f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_shear_is_capped_before_reduction() {
        // sigma_W0 = 150 at k = -1 gives 150 < 184.8, at k = 0 gives 250 -> capped
        let mat = material();
        let tau_a = shear_stress(150.0, 0.0, &mat);
        assert!((tau_a - mat.permissible_cap() / 3f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_pulsating_uses_shear_basic_stress() {
        let mat = MaterialConstants::new(355.0, 470.0);
        let sigma_w0 = 50.0;
        let k = 0.5;
        let sigma_0 = 1.66 * sigma_w0;
        let sigma_1 = 0.75 * 470.0;
        let expected = sigma_0 / (1.0 - (1.0 - sigma_0 / sigma_1) * k) / 3f64.sqrt();
        assert!((shear_stress(sigma_w0, k, &mat) - expected).abs() < TOL);
    }

    #[test]
    fn test_non_negative_over_ratio_range() {
        let mat = material();
        for sigma_w0 in [120.0, 140.0, 164.0] {
            for i in 0..=40 {
                let k = -1.0 + 0.05 * i as f64;
                assert!(shear_stress(sigma_w0, k, &mat) >= 0.0);
            }
        }
    }
}
