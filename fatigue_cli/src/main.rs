//! # Fatigue CLI
//!
//! Terminal front end for the FEM 2131/2132 fatigue check.
//!
//! ```text
//! fatigue_cli check crane_girder.json --report crane_girder.report.json
//! fatigue_cli grades
//! fatigue_cli demo
//! fatigue_cli init new_project.json --grade "S 355"
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fatigue_core::calculations::check_point::{
    BasicStresses, CheckPointLabels, MeasuredStresses, StructuralCheckPoint,
};
use fatigue_core::calculations::{BatchReport, Formulation};
use fatigue_core::materials::SteelTable;
use fatigue_core::{load_project, save_project, save_report, CalcError, FatigueProject};

#[derive(Parser)]
#[command(name = "fatigue_cli", version, about = "FEM 2131/2132 fatigue check for structural steel")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the check points of a project file
    Check {
        /// Project file (JSON)
        project: PathBuf,

        /// Override the governing formulation of the project
        #[arg(long, value_enum)]
        governing: Option<GoverningArg>,

        /// Print the full report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Save the report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// List the built-in steel grade table
    Grades,
    /// Evaluate a built-in sample batch
    Demo {
        #[arg(long, value_enum)]
        governing: Option<GoverningArg>,
    },
    /// Write a template project file
    Init {
        path: PathBuf,

        /// Steel grade of the new project
        #[arg(long, default_value = "S 235")]
        grade: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GoverningArg {
    /// ratio_1 <= 1.0
    Ratio1,
    /// ratio_2 <= 1.05
    Ratio2,
}

impl From<GoverningArg> for Formulation {
    fn from(arg: GoverningArg) -> Self {
        match arg {
            GoverningArg::Ratio1 => Formulation::Ratio1,
            GoverningArg::Ratio2 => Formulation::Ratio2,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            project,
            governing,
            json,
            report,
        } => run_check(project, governing, json, report),
        Command::Grades => {
            print_grades();
            Ok(true)
        }
        Command::Demo { governing } => run_demo(governing),
        Command::Init { path, grade, force } => run_init(&path, grade, force).map(|_| true),
    };

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }

    ExitCode::from(exit_status(&result))
}

/// 0 when every check point passes, 2 when any fails, 1 on a fatal error
fn exit_status(result: &Result<bool, CalcError>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(_) => 1,
    }
}

/// Returns whether every check point passed
fn run_check(
    path: PathBuf,
    governing: Option<GoverningArg>,
    json: bool,
    report_path: Option<PathBuf>,
) -> Result<bool, CalcError> {
    tracing::debug!(path = %path.display(), "loading project");
    let mut project = load_project(&path)?;
    if let Some(governing) = governing {
        project.settings.governing = governing.into();
    }

    let report = project.evaluate(SteelTable::builtin())?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", out);
    } else {
        print_header(&project);
        print_report(&report);
    }

    if let Some(report_path) = report_path {
        save_report(&report, &report_path)?;
        if !json {
            println!();
            println!("Report saved to {}", report_path.display());
        }
    }

    Ok(report.passes())
}

fn run_demo(governing: Option<GoverningArg>) -> Result<bool, CalcError> {
    let mut project = demo_project();
    if let Some(governing) = governing {
        project.settings.governing = governing.into();
    }

    let report = project.evaluate(SteelTable::builtin())?;
    print_header(&project);
    print_report(&report);
    Ok(report.passes())
}

fn run_init(path: &Path, grade: String, force: bool) -> Result<(), CalcError> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "init",
            path.display().to_string(),
            "file already exists, pass --force to overwrite",
        ));
    }

    let mut project = FatigueProject::new("", "", "");
    project.settings.steel_grade = grade;
    // Fail early on an unknown grade rather than writing an unusable file
    project.material_constants(SteelTable::builtin())?;
    project.add_check_point(sample_point("B1", "N1", 80.0, -15.0, 2.0, 60.0, 130.0, -0.5, 0.2, -1.0));

    save_project(&project, path)?;
    println!("Template project written to {}", path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn sample_point(
    bar: &str,
    node: &str,
    sigma_x_max: f64,
    sigma_y_max: f64,
    tau_xy_max: f64,
    sigma_w: f64,
    sigma_w0: f64,
    k_sx: f64,
    k_sy: f64,
    k_txy: f64,
) -> StructuralCheckPoint {
    StructuralCheckPoint::new(
        CheckPointLabels::new(bar, node, "E5", "K3"),
        MeasuredStresses {
            sigma_x_max,
            sigma_y_max,
            tau_xy_max,
        },
        BasicStresses {
            sigma_w,
            sigma_w0,
            k_sx,
            k_sy,
            k_txy,
        },
    )
}

fn demo_project() -> FatigueProject {
    let mut project = FatigueProject::new("Demo", "DEMO-001", "Demo Client");
    let rows = [
        ("B1", "N1", 77.0, -14.0, 3.0, 51.0, 124.0, -0.46, 0.31, -0.92),
        ("B2", "N2", -108.0, 22.0, -2.0, 84.0, 150.0, 0.52, -0.80, 0.15),
        ("B3", "N3", 12.0, 35.0, 1.0, 27.0, 161.0, -1.00, 0.64, -0.33),
        ("B4", "N4", 96.0, -37.0, -4.0, 62.0, 133.0, 0.09, -0.21, 0.74),
        ("B5", "N5", -55.0, -6.0, 0.0, 45.0, 142.0, -0.68, -0.05, -1.00),
    ];
    for (bar, node, sx, sy, txy, sw, sw0, k_sx, k_sy, k_txy) in rows {
        project.add_check_point(sample_point(bar, node, sx, sy, txy, sw, sw0, k_sx, k_sy, k_txy));
    }
    project
}

fn print_header(project: &FatigueProject) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  FATIGUE CHECK - {}", project.settings.standard);
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("Job:      {} ({})", project.meta.job_id, project.meta.client);
    println!("Engineer: {}", project.meta.engineer);
    match project.settings.material_override {
        Some(_) => println!("Steel:    explicit material constants"),
        None => println!(
            "Steel:    {} (t <= {} mm)",
            project.settings.steel_grade, project.settings.thickness_limit_mm
        ),
    }
}

fn print_report(report: &BatchReport) {
    println!("Material: {}", report.material);
    println!("Criterion: {}", report.governing);
    println!();

    println!("Permissible stresses [MPa]:");
    println!(
        "  {:<8} {:<8} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "bar", "node", "sigma_tx", "sigma_cx", "sigma_ty", "sigma_cy", "tau_a"
    );
    for r in &report.results {
        let p = &r.permissible;
        println!(
            "  {:<8} {:<8} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            r.labels.bar, r.labels.node, p.sigma_tx, p.sigma_cx, p.sigma_ty, p.sigma_cy, p.tau_a
        );
    }
    println!();

    println!("Stress ratios:");
    println!(
        "  {:<8} {:<8} {:>9} {:>9} {:>9} {:>9} {:>10}  {}",
        "bar", "node", "ratio_sx", "ratio_sy", "ratio_txy", "ratio_1", "ratio_2", "status"
    );
    for r in &report.results {
        let ratios = &r.ratios;
        println!(
            "  {:<8} {:<8} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>10}  {}",
            r.labels.bar,
            r.labels.node,
            ratios.ratio_s_x,
            ratios.ratio_s_y,
            ratios.ratio_t_xy,
            ratios.ratio_1,
            ratios.ratio_2.to_string(),
            status_icon(r.passes())
        );
    }
    println!();

    let summary = &report.summary;
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  RESULT: {} ({} of {} check points pass)",
        if report.passes() { "PASS" } else { "FAIL" },
        summary.passed,
        summary.total
    );
    if let Some(governing) = &summary.governing_row {
        println!("  Governs: {} with {:.4}", governing.labels, governing.ratio);
    }
    if summary.not_computable > 0 {
        println!("  {} check point(s) with undefined ratio_2", summary.not_computable);
    }
    if summary.non_finite > 0 {
        println!("  {} check point(s) with non-finite ratios", summary.non_finite);
    }
    if summary.out_of_range_k > 0 {
        println!("  {} check point(s) with k outside [-1, 1]", summary.out_of_range_k);
    }
    println!("═══════════════════════════════════════════════════════════════");
}

fn print_grades() {
    println!("{:<8} {:>10} {:>10} {:>10} {:>8}", "grade", "t_max[mm]", "fy[MPa]", "fu[MPa]", "legacy");
    for row in SteelTable::builtin().rows() {
        println!(
            "{:<8} {:>10} {:>10} {:>10} {:>8}",
            row.grade.display_name(),
            row.t_max_mm,
            row.fy_mpa,
            row.fu_mpa,
            row.grade.legacy_designation().unwrap_or("-")
        );
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
