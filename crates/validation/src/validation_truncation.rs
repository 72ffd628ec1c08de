use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use miekit_core::truncation::wiscombe_order;

use crate::validation_utils::{emit_report, ValidationSummary};

/// The Wiscombe truncation order must be at least 1 and nondecreasing in
/// the size parameter.
#[derive(Args, Debug)]
pub struct TruncationArgs {
    /// Smallest size parameter.
    #[arg(long, default_value_t = 1e-3)]
    pub min_x: f64,
    /// Largest size parameter.
    #[arg(long, default_value_t = 1e3)]
    pub max_x: f64,
    /// Number of logarithmically spaced probes.
    #[arg(long, default_value_t = 200)]
    pub steps: usize,
    /// Optional output path for the generated JSON. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct TruncationRow {
    size_parameter: f64,
    order: usize,
}

#[derive(Serialize)]
struct TruncationReport {
    rows: Vec<TruncationRow>,
    validation: ValidationSummary,
}

pub fn run(args: TruncationArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.steps < 2 {
        return Err("at least two probes are required".into());
    }
    if !(args.min_x > 0.0 && args.max_x > args.min_x) {
        return Err("size-parameter range must be positive and increasing".into());
    }

    let ratio = (args.max_x / args.min_x).powf(1.0 / (args.steps - 1) as f64);
    let mut rows = Vec::with_capacity(args.steps);
    let mut violations = 0usize;
    let mut previous = 0usize;
    for step in 0..args.steps {
        let x = args.min_x * ratio.powi(step as i32);
        let order = wiscombe_order(x)?;
        if order < 1 || order < previous {
            violations += 1;
        }
        previous = order;
        rows.push(TruncationRow {
            size_parameter: x,
            order,
        });
    }
    let passed = violations == 0;

    let report = TruncationReport {
        rows,
        validation: ValidationSummary {
            target: "N(x) >= 1 and nondecreasing".to_string(),
            tolerance: 0.0,
            max_abs_error: violations as f64,
            passed,
        },
    };
    emit_report(&report, args.output, "truncation")?;

    if passed {
        Ok(())
    } else {
        Err(format!("truncation monotonicity violated at {violations} probes").into())
    }
}
