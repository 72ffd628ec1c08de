//! Photodiode-style detectors and the coupling integral.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::farfield::FarField;
use crate::mesh::FibonacciMesh;
use crate::source::OpticalSource;
use crate::{SPEED_OF_LIGHT, VACUUM_PERMITTIVITY};

/// An intensity detector looking back at the scatterer through a cone of
/// numerical aperture `numerical_aperture`, pointed by the two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Number of Fibonacci mesh points on the collection cone.
    pub sampling: usize,
    pub numerical_aperture: f64,
    /// Polar pointing offset in radians.
    pub gamma_offset: f64,
    /// Azimuthal pointing offset in radians.
    pub phi_offset: f64,
    /// Optional linear analyzer angle in radians; `None` collects both
    /// field components unfiltered.
    pub polarization_filter: Option<f64>,
    /// Normalize the coupling by the collection solid angle.
    pub mean_coupling: bool,
}

impl Detector {
    pub fn new(
        sampling: usize,
        numerical_aperture: f64,
        gamma_offset: f64,
        phi_offset: f64,
        polarization_filter: Option<f64>,
        mean_coupling: bool,
    ) -> Result<Self, EngineError> {
        if sampling == 0 {
            return Err(EngineError::validation(
                "detector sampling must be at least 1",
            ));
        }
        if !numerical_aperture.is_finite()
            || numerical_aperture <= 0.0
            || numerical_aperture >= 1.0
        {
            return Err(EngineError::validation(format!(
                "detector NA must lie in (0, 1), got {numerical_aperture}"
            )));
        }
        Ok(Self {
            sampling,
            numerical_aperture,
            gamma_offset,
            phi_offset,
            polarization_filter,
            mean_coupling,
        })
    }

    /// Collection cone half-angle, asin(NA).
    pub fn max_angle(&self) -> f64 {
        self.numerical_aperture.asin()
    }

    /// Fibonacci mesh covering the collection cone.
    pub fn mesh(&self) -> FibonacciMesh {
        FibonacciMesh::cap(
            self.sampling,
            self.max_angle(),
            self.gamma_offset,
            self.phi_offset,
        )
    }

    /// Power coupled into the detector, in watts.
    ///
    /// Integrates |E_theta|^2 and |E_phi|^2 over the cone, applies the
    /// analyzer as cos^2/sin^2 projection factors, and scales by the
    /// far-zone Poynting prefactor 0.5 c eps0 (E0 / k)^2.
    pub fn coupling(
        &self,
        fields: &FarField,
        mesh: &FibonacciMesh,
        source: &OpticalSource,
    ) -> f64 {
        let d_omega = mesh.d_omega();
        let mut acc_theta = 0.0;
        let mut acc_phi = 0.0;
        for (ep, et) in fields.e_phi.iter().zip(fields.e_theta.iter()) {
            acc_phi += ep.norm_sqr() * d_omega;
            acc_theta += et.norm_sqr() * d_omega;
        }
        if let Some(filter) = self.polarization_filter {
            acc_theta *= filter.cos().powi(2);
            acc_phi *= filter.sin().powi(2);
        }
        let field_scale = source.amplitude / source.wavenumber();
        let mut power =
            0.5 * SPEED_OF_LIGHT * VACUUM_PERMITTIVITY * field_scale * field_scale
                * (acc_theta + acc_phi);
        if self.mean_coupling {
            power /= d_omega * mesh.len() as f64;
        }
        power
    }
}
