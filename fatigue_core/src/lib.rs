//! # fatigue_core - FEM 2131/2132 Fatigue Check Engine
//!
//! `fatigue_core` computes permissible stresses and combined-stress ratios
//! for structural steel members under cyclic loading, following FEM
//! 2131/2132 §3-4.5.1. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every stage is a pure function of one check point and
//!   the batch-wide material constants
//! - **Row-independent**: one bad check point never aborts the batch
//! - **Fail visible**: non-finite or undefined ratios fail the check, they
//!   are never clamped into a pass
//! - **JSON-First**: all types implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use fatigue_core::calculations::check_point::{
//!     BasicStresses, CheckPointLabels, MeasuredStresses, StructuralCheckPoint,
//! };
//! use fatigue_core::materials::SteelTable;
//! use fatigue_core::project::FatigueProject;
//!
//! let mut project = FatigueProject::new("Jane Engineer", "25-042", "ACME Cranes");
//! project.add_check_point(StructuralCheckPoint::new(
//!     CheckPointLabels::new("B12", "N4", "E5", "K3"),
//!     MeasuredStresses { sigma_x_max: 40.0, sigma_y_max: 5.0, tau_xy_max: 1.0 },
//!     BasicStresses { sigma_w: 60.0, sigma_w0: 120.0, k_sx: -0.5, k_sy: -0.5, k_txy: -1.0 },
//! ));
//!
//! let report = project.evaluate(SteelTable::builtin()).unwrap();
//! assert!(report.passes());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - permissible stresses, combined ratios, validation, batches
//! - [`materials`] - material constants and the steel grade table
//! - [`project`] - project container, metadata and settings
//! - [`errors`] - structured error types
//! - [`file_io`] - JSON persistence with atomic saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BatchReport, FatigueBatch, Formulation, PermissibleStressResult, Verdict};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, load_report, save_project, save_report};
pub use materials::{MaterialConstants, SteelTable};
pub use project::{FatigueProject, FatigueSettings, ProjectMetadata};
