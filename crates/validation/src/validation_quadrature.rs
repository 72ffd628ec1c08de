use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use miekit_core::detector::Detector;
use miekit_core::geometry::RefractiveIndex;
use miekit_core::mesh::FibonacciMesh;
use miekit_core::source::OpticalSource;
use miekit_core::sphere::Sphere;
use miekit_core::Scatterer;

use crate::validation_utils::{emit_report, relative_error, ValidationSummary};

/// Detector coupling is a quadrature over a Fibonacci cap; refining the
/// sampling must converge. Also checks the full-sphere mesh against the
/// exact 4 pi solid angle.
#[derive(Args, Debug)]
pub struct QuadratureArgs {
    /// Vacuum wavelength in meters.
    #[arg(long, default_value_t = 632.8e-9)]
    pub wavelength: f64,
    /// Sphere diameter in meters.
    #[arg(long, default_value_t = 8e-7)]
    pub diameter: f64,
    /// Real part of the particle index.
    #[arg(long, default_value_t = 1.5)]
    pub index_re: f64,
    /// Detector numerical aperture.
    #[arg(long, default_value_t = 0.3)]
    pub detector_na: f64,
    /// Sampling ladder, doubling point counts.
    #[arg(long, value_delimiter = ',', default_values_t = [100, 200, 400, 800, 1600])]
    pub samplings: Vec<usize>,
    /// Optional output path for the generated JSON. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Tolerance on the relative change at the last refinement.
    #[arg(long, default_value_t = 1e-2)]
    pub tol: f64,
}

#[derive(Serialize)]
struct QuadratureRow {
    sampling: usize,
    coupling: f64,
    change_from_previous: Option<f64>,
}

#[derive(Serialize)]
struct QuadratureReport {
    wavelength: f64,
    diameter: f64,
    detector_na: f64,
    solid_angle_error: f64,
    rows: Vec<QuadratureRow>,
    validation: ValidationSummary,
}

pub fn run(args: QuadratureArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.samplings.len() < 2 {
        return Err("at least two sampling counts are required".into());
    }

    let index = RefractiveIndex::new(args.index_re, 0.0)?;
    let source = OpticalSource::plane_wave(args.wavelength, 0.0, 1.0)?;
    let sphere = Sphere::new(source, args.diameter, index, 1.0)?;

    // The full-sphere mesh carries a closed-form solid angle per point.
    let full = FibonacciMesh::full_sphere(1000);
    let solid_angle_error =
        relative_error(full.d_omega() * full.len() as f64, 4.0 * std::f64::consts::PI);

    let mut rows: Vec<QuadratureRow> = Vec::with_capacity(args.samplings.len());
    for &sampling in &args.samplings {
        let detector = Detector::new(sampling, args.detector_na, 0.0, 0.0, None, false)?;
        let coupling = sphere.coupling(&detector);
        let change = rows
            .last()
            .map(|prev| relative_error(coupling, prev.coupling));
        rows.push(QuadratureRow {
            sampling,
            coupling,
            change_from_previous: change,
        });
    }

    let max_abs_error = rows
        .last()
        .and_then(|row| row.change_from_previous)
        .unwrap_or(f64::NAN);
    let passed = max_abs_error <= args.tol && solid_angle_error <= 1e-12;

    let report = QuadratureReport {
        wavelength: args.wavelength,
        diameter: args.diameter,
        detector_na: args.detector_na,
        solid_angle_error,
        rows,
        validation: ValidationSummary {
            target: "coupling converges under sampling refinement".to_string(),
            tolerance: args.tol,
            max_abs_error,
            passed,
        },
    };
    emit_report(&report, args.output, "quadrature")?;

    if passed {
        Ok(())
    } else {
        Err(format!(
            "quadrature convergence violated (last refinement change = {:.3e} > {:.3e})",
            max_abs_error, args.tol
        )
        .into())
    }
}
