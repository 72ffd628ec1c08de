//! Single-point evaluation entry points.
//!
//! These free functions take fully validated SI-unit descriptors, build the
//! matching scatterer, and return raw numbers. The sweep driver and the
//! Python bindings both funnel through here.

use num_complex::Complex64;

use crate::coreshell::CoreShell;
use crate::cylinder::Cylinder;
use crate::detector::Detector;
use crate::error::EngineError;
use crate::farfield::AmplitudePair;
use crate::geometry::{ScattererGeometry, ScattererOptics};
use crate::measure::Measure;
use crate::scatterer::Scatterer;
use crate::source::OpticalSource;
use crate::sphere::Sphere;

/// Build the scatterer described by `geometry` and `optics` under `source`.
pub fn build_scatterer(
    geometry: &ScattererGeometry,
    optics: &ScattererOptics,
    source: &OpticalSource,
) -> Result<Box<dyn Scatterer + Send + Sync>, EngineError> {
    geometry.validate()?;
    optics.validate()?;
    match *geometry {
        ScattererGeometry::Sphere { diameter } => Ok(Box::new(Sphere::new(
            *source,
            diameter,
            optics.core,
            optics.medium,
        )?)),
        ScattererGeometry::CoreShell {
            core_diameter,
            shell_width,
        } => {
            let shell = optics.shell.ok_or_else(|| {
                EngineError::validation("core-shell geometry requires a shell index")
            })?;
            Ok(Box::new(CoreShell::new(
                *source,
                core_diameter,
                shell_width,
                optics.core,
                shell,
                optics.medium,
            )?))
        }
        ScattererGeometry::Cylinder { diameter } => Ok(Box::new(Cylinder::new(
            *source,
            diameter,
            optics.core,
            optics.medium,
        )?)),
    }
}

/// Evaluate a detector-free measure at a single parameter point.
pub fn evaluate(
    geometry: &ScattererGeometry,
    optics: &ScattererOptics,
    source: &OpticalSource,
    measure: Measure,
) -> Result<f64, EngineError> {
    if measure.needs_detector() {
        return Err(EngineError::UnsupportedMeasure(
            "coupling requires a detector; use evaluate_coupling".into(),
        ));
    }
    build_scatterer(geometry, optics, source)?.measure(measure)
}

/// S1/S2 at the given polar angles for a single parameter point.
pub fn evaluate_far_field(
    geometry: &ScattererGeometry,
    optics: &ScattererOptics,
    source: &OpticalSource,
    angles: &[f64],
) -> Result<AmplitudePair, EngineError> {
    Ok(build_scatterer(geometry, optics, source)?.s1s2(angles))
}

/// Detector-coupled power, in watts, at a single parameter point.
pub fn evaluate_coupling(
    geometry: &ScattererGeometry,
    optics: &ScattererOptics,
    source: &OpticalSource,
    detector: &Detector,
) -> Result<f64, EngineError> {
    Ok(build_scatterer(geometry, optics, source)?.coupling(detector))
}

/// Expansion coefficients at a single parameter point; `max_order = 0`
/// keeps the natural truncation.
pub fn evaluate_coefficients(
    geometry: &ScattererGeometry,
    optics: &ScattererOptics,
    source: &OpticalSource,
    max_order: usize,
) -> Result<(Vec<Complex64>, Vec<Complex64>), EngineError> {
    let scatterer = build_scatterer(geometry, optics, source)?;
    Ok((scatterer.an(max_order)?, scatterer.bn(max_order)?))
}
