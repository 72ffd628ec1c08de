use std::path::PathBuf;

use clap::Args;
use num_complex::Complex64;
use serde::Serialize;

use miekit_core::geometry::RefractiveIndex;
use miekit_core::source::OpticalSource;
use miekit_core::sphere::Sphere;
use miekit_core::Scatterer;

use crate::validation_utils::{emit_report, relative_error, ValidationSummary};

/// In the small-particle limit Qsca approaches the Rayleigh closed form
/// (8/3) x^4 |(m^2 - 1) / (m^2 + 2)|^2. The relative deviation must shrink
/// with x and fall below the tolerance at the smallest probe.
#[derive(Args, Debug)]
pub struct RayleighArgs {
    /// Vacuum wavelength in meters.
    #[arg(long, default_value_t = 632.8e-9)]
    pub wavelength: f64,
    /// Real part of the particle index.
    #[arg(long, default_value_t = 1.5)]
    pub index_re: f64,
    /// Imaginary part of the particle index.
    #[arg(long, default_value_t = 0.0)]
    pub index_im: f64,
    /// Largest size parameter to probe.
    #[arg(long, default_value_t = 0.2)]
    pub max_x: f64,
    /// Number of probes, halving x each step.
    #[arg(long, default_value_t = 6)]
    pub steps: usize,
    /// Optional output path for the generated JSON. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Tolerance on the relative deviation at the smallest x.
    #[arg(long, default_value_t = 1e-4)]
    pub tol: f64,
}

#[derive(Serialize)]
struct RayleighRow {
    size_parameter: f64,
    qsca: f64,
    qsca_rayleigh: f64,
    relative_error: f64,
}

#[derive(Serialize)]
struct RayleighReport {
    wavelength: f64,
    index: [f64; 2],
    rows: Vec<RayleighRow>,
    validation: ValidationSummary,
}

pub fn run(args: RayleighArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.steps < 2 {
        return Err("at least two probes are required".into());
    }
    if !(args.max_x > 0.0 && args.max_x < 1.0) {
        return Err("max size parameter must lie in (0, 1)".into());
    }

    let index = RefractiveIndex::new(args.index_re, args.index_im)?;
    let m = Complex64::new(args.index_re, args.index_im);
    let lorentz = (m * m - 1.0) / (m * m + 2.0);
    let prefactor = 8.0 / 3.0 * lorentz.norm_sqr();

    let mut rows = Vec::with_capacity(args.steps);
    for step in 0..args.steps {
        let x = args.max_x / 2f64.powi(step as i32);
        let diameter = x * args.wavelength / std::f64::consts::PI;
        let source = OpticalSource::plane_wave(args.wavelength, 0.0, 1.0)?;
        let sphere = Sphere::new(source, diameter, index, 1.0)?;
        let qsca = sphere.qsca();
        let qsca_rayleigh = prefactor * x.powi(4);
        rows.push(RayleighRow {
            size_parameter: x,
            qsca,
            qsca_rayleigh,
            relative_error: relative_error(qsca, qsca_rayleigh),
        });
    }

    let max_abs_error = rows.last().map(|row| row.relative_error).unwrap_or(f64::NAN);
    let shrinking = rows
        .windows(2)
        .all(|pair| pair[1].relative_error <= pair[0].relative_error * 1.01);
    let passed = shrinking && max_abs_error <= args.tol;

    let report = RayleighReport {
        wavelength: args.wavelength,
        index: [args.index_re, args.index_im],
        rows,
        validation: ValidationSummary {
            target: "Qsca -> (8/3) x^4 |(m^2-1)/(m^2+2)|^2 as x -> 0".to_string(),
            tolerance: args.tol,
            max_abs_error,
            passed,
        },
    };
    emit_report(&report, args.output, "rayleigh")?;

    if passed {
        Ok(())
    } else {
        Err(format!(
            "Rayleigh limit violated (error at smallest x = {:.3e} > {:.3e})",
            max_abs_error, args.tol
        )
        .into())
    }
}
