use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use miekit_core::coreshell::CoreShell;
use miekit_core::geometry::RefractiveIndex;
use miekit_core::source::OpticalSource;
use miekit_core::sphere::Sphere;
use miekit_core::Scatterer;

use crate::validation_utils::{emit_report, relative_error, ValidationSummary};

/// A coated sphere whose shell shares the core index must reproduce the
/// homogeneous sphere of the outer diameter, and one with zero shell width
/// must reproduce the bare core.
#[derive(Args, Debug)]
pub struct CoreshellArgs {
    /// Vacuum wavelength in meters.
    #[arg(long, default_value_t = 632.8e-9)]
    pub wavelength: f64,
    /// Real part of the particle index.
    #[arg(long, default_value_t = 1.5)]
    pub index_re: f64,
    /// Imaginary part of the particle index.
    #[arg(long, default_value_t = 0.05)]
    pub index_im: f64,
    /// Surrounding medium index.
    #[arg(long, default_value_t = 1.0)]
    pub medium: f64,
    /// Core diameters to probe, in meters.
    #[arg(long, value_delimiter = ',', default_values_t = [2e-7, 5e-7, 1e-6, 3e-6])]
    pub diameters: Vec<f64>,
    /// Shell width for the matched-index case, in meters.
    #[arg(long, default_value_t = 2e-7)]
    pub shell_width: f64,
    /// Optional output path for the generated JSON. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Tolerance on the relative deviation of Qsca, Qext, and g.
    #[arg(long, default_value_t = 1e-8)]
    pub tol: f64,
}

#[derive(Serialize)]
struct DegenerateRow {
    core_diameter: f64,
    case: &'static str,
    qsca_error: f64,
    qext_error: f64,
    g_error: f64,
}

#[derive(Serialize)]
struct CoreshellReport {
    wavelength: f64,
    index: [f64; 2],
    shell_width: f64,
    rows: Vec<DegenerateRow>,
    validation: ValidationSummary,
}

pub fn run(args: CoreshellArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = RefractiveIndex::new(args.index_re, args.index_im)?;
    let mut rows = Vec::new();
    let mut max_abs_error: f64 = 0.0;

    for &core_diameter in &args.diameters {
        // Matched shell index: equivalent to a homogeneous sphere of the
        // outer diameter.
        let outer = core_diameter + 2.0 * args.shell_width;
        let coated = CoreShell::new(
            source(args.wavelength)?,
            core_diameter,
            args.shell_width,
            index,
            index,
            args.medium,
        )?;
        let sphere = Sphere::new(source(args.wavelength)?, outer, index, args.medium)?;
        let row = compare("matched_index", core_diameter, &coated, &sphere);
        max_abs_error = max_abs_error
            .max(row.qsca_error)
            .max(row.qext_error)
            .max(row.g_error);
        rows.push(row);

        // Vanishing shell: equivalent to the bare core.
        let collapsed = CoreShell::new(
            source(args.wavelength)?,
            core_diameter,
            0.0,
            index,
            index,
            args.medium,
        )?;
        let bare = Sphere::new(source(args.wavelength)?, core_diameter, index, args.medium)?;
        let row = compare("zero_shell", core_diameter, &collapsed, &bare);
        max_abs_error = max_abs_error
            .max(row.qsca_error)
            .max(row.qext_error)
            .max(row.g_error);
        rows.push(row);
    }
    let passed = max_abs_error <= args.tol;

    let report = CoreshellReport {
        wavelength: args.wavelength,
        index: [args.index_re, args.index_im],
        shell_width: args.shell_width,
        rows,
        validation: ValidationSummary {
            target: "degenerate coated sphere = homogeneous sphere".to_string(),
            tolerance: args.tol,
            max_abs_error,
            passed,
        },
    };
    emit_report(&report, args.output, "coreshell")?;

    if passed {
        Ok(())
    } else {
        Err(format!(
            "coated-sphere degeneracy violated (max rel error = {:.3e} > {:.3e})",
            max_abs_error, args.tol
        )
        .into())
    }
}

fn source(wavelength: f64) -> Result<OpticalSource, miekit_core::EngineError> {
    OpticalSource::plane_wave(wavelength, 0.0, 1.0)
}

fn compare(
    case: &'static str,
    core_diameter: f64,
    coated: &CoreShell,
    sphere: &Sphere,
) -> DegenerateRow {
    DegenerateRow {
        core_diameter,
        case,
        qsca_error: relative_error(coated.qsca(), sphere.qsca()),
        qext_error: relative_error(coated.qext(), sphere.qext()),
        g_error: relative_error(coated.g(), sphere.g()),
    }
}
