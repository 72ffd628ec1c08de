use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use miekit_core::geometry::RefractiveIndex;
use miekit_core::source::OpticalSource;
use miekit_core::sphere::Sphere;
use miekit_core::Scatterer;

use crate::validation_utils::{emit_report, relative_error, ValidationSummary};

#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Vacuum wavelength in meters.
    #[arg(long, default_value_t = 632.8e-9)]
    pub wavelength: f64,
    /// Real part of the particle index.
    #[arg(long, default_value_t = 1.5)]
    pub index_re: f64,
    /// Imaginary part of the particle index.
    #[arg(long, default_value_t = 0.1)]
    pub index_im: f64,
    /// Surrounding medium index.
    #[arg(long, default_value_t = 1.0)]
    pub medium: f64,
    /// Smallest diameter in meters.
    #[arg(long, default_value_t = 50e-9)]
    pub min_diameter: f64,
    /// Largest diameter in meters.
    #[arg(long, default_value_t = 5e-6)]
    pub max_diameter: f64,
    /// Number of logarithmically spaced diameters.
    #[arg(long, default_value_t = 50)]
    pub steps: usize,
    /// Optional output path for the generated JSON. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Tolerance for |Qsca + Qabs - Qext| / Qext.
    #[arg(long, default_value_t = 1e-10)]
    pub tol: f64,
}

#[derive(Serialize)]
struct EnergyRow {
    diameter: f64,
    size_parameter: f64,
    qsca: f64,
    qabs: f64,
    qext: f64,
    relative_error: f64,
}

#[derive(Serialize)]
struct EnergyReport {
    wavelength: f64,
    index: [f64; 2],
    medium: f64,
    rows: Vec<EnergyRow>,
    validation: ValidationSummary,
}

pub fn run(args: EnergyArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.steps < 2 {
        return Err("at least two diameters are required".into());
    }
    if !(args.min_diameter > 0.0 && args.max_diameter > args.min_diameter) {
        return Err("diameter range must be positive and increasing".into());
    }

    let index = RefractiveIndex::new(args.index_re, args.index_im)?;
    let ratio = (args.max_diameter / args.min_diameter).powf(1.0 / (args.steps - 1) as f64);

    let mut rows = Vec::with_capacity(args.steps);
    let mut max_abs_error: f64 = 0.0;
    for step in 0..args.steps {
        let diameter = args.min_diameter * ratio.powi(step as i32);
        let source = OpticalSource::plane_wave(args.wavelength, 0.0, 1.0)?;
        let sphere = Sphere::new(source, diameter, index, args.medium)?;
        let (qsca, qabs, qext) = (sphere.qsca(), sphere.qabs(), sphere.qext());
        let err = relative_error(qsca + qabs, qext);
        max_abs_error = max_abs_error.max(err);
        rows.push(EnergyRow {
            diameter,
            size_parameter: sphere.size_parameter(),
            qsca,
            qabs,
            qext,
            relative_error: err,
        });
    }
    let passed = max_abs_error <= args.tol;

    let report = EnergyReport {
        wavelength: args.wavelength,
        index: [args.index_re, args.index_im],
        medium: args.medium,
        rows,
        validation: ValidationSummary {
            target: "Qsca + Qabs = Qext".to_string(),
            tolerance: args.tol,
            max_abs_error,
            passed,
        },
    };
    emit_report(&report, args.output, "energy")?;

    if passed {
        Ok(())
    } else {
        Err(format!(
            "energy conservation violated (max rel error = {:.3e} > {:.3e})",
            max_abs_error, args.tol
        )
        .into())
    }
}
