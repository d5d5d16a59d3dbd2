//! # Structural Check Points
//!
//! One check point is one row of a fatigue batch: a physical location
//! (bar, node, component group, notch effect class) with its measured
//! stress extremes and the basic stresses and load-reversal ratios needed
//! to derive permissible stresses.
//!
//! All stresses are in MPa. Positive normal stress is tension, negative is
//! compression.
//!
//! ## JSON Example
//!
//! Rows serialize flat, one object per check point:
//!
//! ```json
//! {
//!   "bar": "B12",
//!   "node": "N4",
//!   "component_group": "E5",
//!   "notch_effect": "K3",
//!   "sigma_x_max": 100.0,
//!   "sigma_y_max": -20.0,
//!   "tau_xy_max": 3.0,
//!   "sigma_w": 60.0,
//!   "sigma_w0": 120.0,
//!   "k_sx": -0.5,
//!   "k_sy": 0.2,
//!   "k_txy": -1.0
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Identifying labels of a check point.
///
/// Opaque to the calculation: carried through to the results only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPointLabels {
    /// Bar (member) identifier
    pub bar: String,

    /// Node identifier
    pub node: String,

    /// Component group per FEM 2131/2132 (e.g., "E5")
    pub component_group: String,

    /// Notch effect class (e.g., "K3")
    pub notch_effect: String,
}

impl CheckPointLabels {
    pub fn new(
        bar: impl Into<String>,
        node: impl Into<String>,
        component_group: impl Into<String>,
        notch_effect: impl Into<String>,
    ) -> Self {
        CheckPointLabels {
            bar: bar.into(),
            node: node.into(),
            component_group: component_group.into(),
            notch_effect: notch_effect.into(),
        }
    }
}

impl std::fmt::Display for CheckPointLabels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bar {} / node {}", self.bar, self.node)
    }
}

/// Measured maximum stresses at a check point (MPa)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasuredStresses {
    /// Maximum normal stress along x (signed)
    pub sigma_x_max: f64,

    /// Maximum normal stress along y (signed)
    pub sigma_y_max: f64,

    /// Maximum shear stress in the xy plane (used by absolute value)
    pub tau_xy_max: f64,
}

/// Basic stresses and load-reversal ratios of a check point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStresses {
    /// Basic stress sigma_W for normal stresses (MPa)
    pub sigma_w: f64,

    /// Basic stress sigma_W0 for shear (MPa)
    pub sigma_w0: f64,

    /// Load-reversal ratio of sigma_x
    pub k_sx: f64,

    /// Load-reversal ratio of sigma_y
    pub k_sy: f64,

    /// Load-reversal ratio of tau_xy
    pub k_txy: f64,
}

impl BasicStresses {
    /// Ratios outside [-1, +1], by field name.
    ///
    /// Such ratios are still evaluated; the standard only defines k on
    /// that interval, so they are reported.
    pub fn out_of_range_ratios(&self) -> Vec<(&'static str, f64)> {
        [("k_sx", self.k_sx), ("k_sy", self.k_sy), ("k_txy", self.k_txy)]
            .into_iter()
            .filter(|(_, k)| !(-1.0..=1.0).contains(k))
            .collect()
    }
}

/// One row of a fatigue batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralCheckPoint {
    #[serde(flatten)]
    pub labels: CheckPointLabels,

    #[serde(flatten)]
    pub measured: MeasuredStresses,

    #[serde(flatten)]
    pub basic: BasicStresses,
}

impl StructuralCheckPoint {
    pub fn new(labels: CheckPointLabels, measured: MeasuredStresses, basic: BasicStresses) -> Self {
        StructuralCheckPoint {
            labels,
            measured,
            basic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuralCheckPoint {
        StructuralCheckPoint::new(
            CheckPointLabels::new("B12", "N4", "E5", "K3"),
            MeasuredStresses {
                sigma_x_max: 100.0,
                sigma_y_max: -20.0,
                tau_xy_max: 3.0,
            },
            BasicStresses {
                sigma_w: 60.0,
                sigma_w0: 120.0,
                k_sx: -0.5,
                k_sy: 0.2,
                k_txy: -1.0,
            },
        )
    }

    #[test]
    fn test_flat_serialization() {
        let point = sample();
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json["bar"], "B12");
        assert_eq!(json["sigma_x_max"], 100.0);
        assert_eq!(json["k_txy"], -1.0);

        let roundtrip: StructuralCheckPoint = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, point);
    }

    #[test]
    fn test_out_of_range_ratios() {
        let mut point = sample();
        assert!(point.basic.out_of_range_ratios().is_empty());

        point.basic.k_sy = 1.3;
        let flagged = point.basic.out_of_range_ratios();
        assert_eq!(flagged, vec![("k_sy", 1.3)]);
    }

    #[test]
    fn test_labels_display() {
        assert_eq!(sample().labels.to_string(), "bar B12 / node N4");
    }
}
