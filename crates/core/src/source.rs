//! Illumination sources.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{check_length, EngineError};
use crate::{SPEED_OF_LIGHT, VACUUM_PERMITTIVITY};

/// A monochromatic plane-wave or Gaussian source.
///
/// The polarization is carried as a Jones vector in the transverse plane.
/// A linear polarization at angle theta from the x axis maps to
/// `[cos theta, sin theta]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalSource {
    /// Vacuum wavelength in meters.
    pub wavelength: f64,
    /// Jones vector (x, y components), normalized.
    pub jones: [Complex64; 2],
    /// Peak electric field amplitude in V/m.
    pub amplitude: f64,
    /// Numerical aperture of the focusing optics (0 for a plane wave).
    pub numerical_aperture: f64,
}

impl OpticalSource {
    /// Gaussian beam focused through an aperture of the given NA, carrying
    /// `optical_power` watts. The field amplitude follows from the waist
    /// w0 = lambda / (pi NA) and the on-axis intensity of a TEM00 beam.
    pub fn gaussian(
        wavelength: f64,
        polarization: f64,
        optical_power: f64,
        numerical_aperture: f64,
    ) -> Result<Self, EngineError> {
        check_length("wavelength", wavelength)?;
        if !optical_power.is_finite() || optical_power <= 0.0 {
            return Err(EngineError::validation(format!(
                "optical power must be finite and positive, got {optical_power}"
            )));
        }
        if !numerical_aperture.is_finite()
            || numerical_aperture <= 0.0
            || numerical_aperture >= 1.0
        {
            return Err(EngineError::validation(format!(
                "source NA must lie in (0, 1), got {numerical_aperture}"
            )));
        }
        let w0 = wavelength / (std::f64::consts::PI * numerical_aperture);
        let intensity = 2.0 * optical_power / (std::f64::consts::PI * w0 * w0);
        let amplitude = (2.0 * intensity / (SPEED_OF_LIGHT * VACUUM_PERMITTIVITY)).sqrt();
        Ok(Self {
            wavelength,
            jones: jones_from_angle(polarization),
            amplitude,
            numerical_aperture,
        })
    }

    /// Plane wave with the given field amplitude in V/m.
    pub fn plane_wave(
        wavelength: f64,
        polarization: f64,
        amplitude: f64,
    ) -> Result<Self, EngineError> {
        check_length("wavelength", wavelength)?;
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return Err(EngineError::validation(format!(
                "field amplitude must be finite and positive, got {amplitude}"
            )));
        }
        Ok(Self {
            wavelength,
            jones: jones_from_angle(polarization),
            amplitude,
            numerical_aperture: 0.0,
        })
    }

    /// Vacuum wavenumber 2 pi / lambda.
    pub fn wavenumber(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.wavelength
    }
}

/// Jones vector of a linear polarization at `angle` radians from x.
pub fn jones_from_angle(angle: f64) -> [Complex64; 2] {
    [
        Complex64::new(angle.cos(), 0.0),
        Complex64::new(angle.sin(), 0.0),
    ]
}
