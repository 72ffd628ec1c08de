//! Scatterer geometry and optical property descriptions.

use serde::{Deserialize, Serialize};

use crate::error::{check_length, EngineError};

/// A complex refractive index n + i k, with k >= 0 meaning absorption
/// under the exp(-i omega t) convention used throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefractiveIndex {
    pub re: f64,
    pub im: f64,
}

impl RefractiveIndex {
    pub fn new(re: f64, im: f64) -> Result<Self, EngineError> {
        if !re.is_finite() || !im.is_finite() || re <= 0.0 {
            return Err(EngineError::validation(format!(
                "refractive index must be finite with positive real part, got {re}+{im}i"
            )));
        }
        Ok(Self { re, im })
    }

    pub fn real(re: f64) -> Result<Self, EngineError> {
        Self::new(re, 0.0)
    }

    pub fn as_complex(&self) -> num_complex::Complex64 {
        num_complex::Complex64::new(self.re, self.im)
    }
}

/// Shape of the particle, in meters. Tagged so TOML sweep files read as
/// `{ kind = "sphere", diameter = 8.0e-7 }` and the like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScattererGeometry {
    Sphere { diameter: f64 },
    CoreShell { core_diameter: f64, shell_width: f64 },
    Cylinder { diameter: f64 },
}

impl ScattererGeometry {
    pub fn validate(&self) -> Result<(), EngineError> {
        match *self {
            ScattererGeometry::Sphere { diameter } => check_length("diameter", diameter),
            ScattererGeometry::CoreShell {
                core_diameter,
                shell_width,
            } => {
                check_length("core_diameter", core_diameter)?;
                if !shell_width.is_finite() || shell_width < 0.0 {
                    return Err(EngineError::validation(format!(
                        "shell_width must be finite and non-negative, got {shell_width}"
                    )));
                }
                Ok(())
            }
            ScattererGeometry::Cylinder { diameter } => check_length("diameter", diameter),
        }
    }

    /// Outer diameter of the particle.
    pub fn outer_diameter(&self) -> f64 {
        match *self {
            ScattererGeometry::Sphere { diameter } => diameter,
            ScattererGeometry::CoreShell {
                core_diameter,
                shell_width,
            } => core_diameter + 2.0 * shell_width,
            ScattererGeometry::Cylinder { diameter } => diameter,
        }
    }
}

/// Material properties of the particle and its surrounding medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScattererOptics {
    /// Index of the particle body (the core, for a coated particle).
    pub core: RefractiveIndex,
    /// Index of the shell layer, for coated particles only.
    #[serde(default)]
    pub shell: Option<RefractiveIndex>,
    /// Real index of the non-absorbing host medium.
    pub medium: f64,
}

impl ScattererOptics {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.medium.is_finite() || self.medium <= 0.0 {
            return Err(EngineError::validation(format!(
                "medium index must be finite and positive, got {}",
                self.medium
            )));
        }
        Ok(())
    }
}
