use std::{fs, path::PathBuf};

use serde::Serialize;

/// Relative error of `actual` against `reference`, falling back to the
/// absolute error when the reference vanishes.
pub fn relative_error(actual: f64, reference: f64) -> f64 {
    let diff = (actual - reference).abs();
    if reference.abs() > f64::EPSILON {
        diff / reference.abs()
    } else {
        diff
    }
}

/// Serialize a report to pretty JSON, writing to `output` or stdout.
pub fn emit_report<T: Serialize>(
    report: &T,
    output: Option<PathBuf>,
    label: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, json)?;
        eprintln!("Saved {label} validation report to {}", path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ValidationSummary {
    pub target: String,
    pub tolerance: f64,
    pub max_abs_error: f64,
    pub passed: bool,
}
