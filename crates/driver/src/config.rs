//! Configuration types for parameter sweeps.
//!
//! A sweep TOML declares the source, scatterer, and (optionally) detector
//! axes. Every array-valued field contributes one sweep axis; the Cartesian
//! product of all axes is the set of evaluation points.
//!
//! ```toml
//! [source]
//! wavelength = [632.8e-9]
//! polarization = [0.0]
//! amplitude = 1.0
//!
//! [scatterer]
//! kind = "sphere"
//! diameter = [4.0e-7, 8.0e-7]
//! index = [{ re = 1.5 }]
//! medium = [1.0]
//!
//! [detector]
//! numerical_aperture = [0.2]
//! phi_offset = [0.0]
//! gamma_offset = [0.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use miekit_core::geometry::RefractiveIndex;
use miekit_core::EngineError;

use crate::driver::DriverError;

/// A complex refractive index in sweep files, `{ re = 1.5, im = 0.01 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexSpec {
    pub re: f64,
    #[serde(default)]
    pub im: f64,
}

impl ComplexSpec {
    pub fn to_index(self) -> Result<RefractiveIndex, EngineError> {
        RefractiveIndex::new(self.re, self.im)
    }
}

/// Source axes plus the fixed amplitude description.
///
/// Exactly one of `amplitude` (plane wave) or `optical_power` +
/// `numerical_aperture` (Gaussian) must be given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSweep {
    /// Vacuum wavelengths in meters.
    pub wavelength: Vec<f64>,
    /// Linear polarization angles in radians.
    pub polarization: Vec<f64>,
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub optical_power: Option<f64>,
    #[serde(default)]
    pub numerical_aperture: Option<f64>,
}

/// Scatterer axes, discriminated by particle kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScattererSweep {
    Sphere {
        diameter: Vec<f64>,
        index: Vec<ComplexSpec>,
        medium: Vec<f64>,
    },
    CoreShell {
        core_diameter: Vec<f64>,
        shell_width: Vec<f64>,
        core_index: Vec<ComplexSpec>,
        shell_index: Vec<ComplexSpec>,
        medium: Vec<f64>,
    },
    Cylinder {
        diameter: Vec<f64>,
        index: Vec<ComplexSpec>,
        medium: Vec<f64>,
    },
}

fn default_sampling() -> usize {
    200
}

/// Detector axes plus the fixed quadrature sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSweep {
    #[serde(default = "default_sampling")]
    pub sampling: usize,
    pub numerical_aperture: Vec<f64>,
    pub phi_offset: Vec<f64>,
    pub gamma_offset: Vec<f64>,
    /// Analyzer angles in radians; omit the table key for an open detector.
    #[serde(default)]
    pub polarization_filter: Option<Vec<f64>>,
    #[serde(default)]
    pub mean_coupling: bool,
}

/// A full sweep declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub source: SourceSweep,
    pub scatterer: ScattererSweep,
    #[serde(default)]
    pub detector: Option<DetectorSweep>,
}

impl SweepConfig {
    pub fn from_path(path: &Path) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DriverError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, DriverError> {
        let config: SweepConfig =
            toml::from_str(text).map_err(|e| DriverError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that do not depend on individual axis values.
    pub fn validate(&self) -> Result<(), DriverError> {
        match (
            self.source.amplitude,
            self.source.optical_power,
            self.source.numerical_aperture,
        ) {
            (Some(_), None, None) => {}
            (None, Some(_), Some(_)) => {}
            _ => {
                return Err(DriverError::ConfigError(
                    "source needs either `amplitude` or both `optical_power` and \
                     `numerical_aperture`"
                        .into(),
                ))
            }
        }
        if let Some(detector) = &self.detector {
            if detector.sampling == 0 {
                return Err(DriverError::ConfigError(
                    "detector sampling must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }
}
