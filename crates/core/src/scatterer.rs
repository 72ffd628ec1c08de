//! The common scatterer interface.

use num_complex::Complex64;

use crate::detector::Detector;
use crate::error::EngineError;
use crate::farfield::{AmplitudePair, FarField, StokesSet};
use crate::measure::Measure;
use crate::mesh::FibonacciMesh;
use crate::source::OpticalSource;

/// A particle in a known illumination, with its expansion coefficients
/// already computed. Angles are polar scattering angles in radians with
/// 0 pointing forward.
pub trait Scatterer {
    fn source(&self) -> &OpticalSource;

    /// Outer size parameter.
    fn size_parameter(&self) -> f64;

    /// Geometric cross-sectional area in m^2.
    fn area(&self) -> f64;

    /// Number of terms retained in the multipole series.
    fn max_order(&self) -> usize;

    /// Electric multipole coefficients a_n, n = 1..=order. `max_order = 0`
    /// returns the natural (Wiscombe) truncation; a larger request
    /// recomputes the series at that order.
    fn an(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError>;

    /// Magnetic multipole coefficients b_n, same convention as [`an`].
    ///
    /// [`an`]: Scatterer::an
    fn bn(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError>;

    /// Scattering amplitudes at the given polar angles.
    fn s1s2(&self, angles: &[f64]) -> AmplitudePair;

    fn qsca(&self) -> f64;
    fn qext(&self) -> f64;

    /// Asymmetry parameter <cos theta>.
    fn g(&self) -> f64;

    fn qback(&self) -> Result<f64, EngineError>;
    fn qforward(&self) -> Result<f64, EngineError>;

    fn qabs(&self) -> f64 {
        self.qext() - self.qsca()
    }

    fn qpr(&self) -> f64 {
        self.qext() - self.g() * self.qsca()
    }

    fn qratio(&self) -> Result<f64, EngineError> {
        Ok(self.qback()? / self.qsca())
    }

    fn csca(&self) -> f64 {
        self.qsca() * self.area()
    }

    fn cext(&self) -> f64 {
        self.qext() * self.area()
    }

    fn cabs(&self) -> f64 {
        self.qabs() * self.area()
    }

    fn cpr(&self) -> f64 {
        self.qpr() * self.area()
    }

    fn cback(&self) -> Result<f64, EngineError> {
        Ok(self.qback()? * self.area())
    }

    fn cforward(&self) -> Result<f64, EngineError> {
        Ok(self.qforward()? * self.area())
    }

    fn cratio(&self) -> Result<f64, EngineError> {
        Ok(self.qratio()? * self.area())
    }

    /// Far-zone fields on an arbitrary set of directions.
    fn fields_on(&self, thetas: &[f64], azimuths: &[f64]) -> FarField {
        let amplitudes = self.s1s2(thetas);
        FarField::from_amplitudes(&amplitudes, self.source().jones, azimuths)
    }

    /// Far-zone fields on a mesh.
    fn fields_on_mesh(&self, mesh: &FibonacciMesh) -> FarField {
        self.fields_on(&mesh.thetas(), &mesh.azimuths())
    }

    /// Stokes parameters on a full-sphere mesh of the given sampling.
    fn stokes(&self, sampling: usize) -> StokesSet {
        let mesh = FibonacciMesh::full_sphere(sampling);
        StokesSet::from_fields(&self.fields_on_mesh(&mesh))
    }

    /// Power coupled into `detector`, in watts.
    fn coupling(&self, detector: &Detector) -> f64 {
        let mesh = detector.mesh();
        let fields = self.fields_on_mesh(&mesh);
        detector.coupling(&fields, &mesh, self.source())
    }

    /// Asymmetry parameter by quadrature of the phase function over a
    /// full-sphere mesh; used where no closed series exists.
    fn g_from_fields(&self, sampling: usize) -> f64 {
        let mesh = FibonacciMesh::full_sphere(sampling);
        let fields = self.fields_on_mesh(&mesh);
        let spf: Vec<f64> = fields
            .e_phi
            .iter()
            .zip(fields.e_theta.iter())
            .map(|(ep, et)| ep.norm_sqr() + et.norm_sqr())
            .collect();
        let norm = mesh.integral(&spf);
        if norm == 0.0 {
            0.0
        } else {
            mesh.cos_integral(&spf) / norm
        }
    }

    /// Evaluate a detector-free measure.
    fn measure(&self, measure: Measure) -> Result<f64, EngineError> {
        let nth_modulus = |coeffs: Result<Vec<Complex64>, EngineError>,
                           n: usize|
         -> Result<f64, EngineError> {
            coeffs?.get(n - 1).map(|c| c.norm()).ok_or_else(|| {
                EngineError::instability(format!(
                    "multipole order {n} not available at truncation {}",
                    self.max_order()
                ))
            })
        };
        match measure {
            Measure::Qsca => Ok(self.qsca()),
            Measure::Qext => Ok(self.qext()),
            Measure::Qabs => Ok(self.qabs()),
            Measure::Qpr => Ok(self.qpr()),
            Measure::Qback => self.qback(),
            Measure::Qforward => self.qforward(),
            Measure::Qratio => self.qratio(),
            Measure::Csca => Ok(self.csca()),
            Measure::Cext => Ok(self.cext()),
            Measure::Cabs => Ok(self.cabs()),
            Measure::Cpr => Ok(self.cpr()),
            Measure::Cback => self.cback(),
            Measure::Cforward => self.cforward(),
            Measure::Cratio => self.cratio(),
            Measure::G => Ok(self.g()),
            Measure::A1 => nth_modulus(self.an(0), 1),
            Measure::A2 => nth_modulus(self.an(0), 2),
            Measure::A3 => nth_modulus(self.an(0), 3),
            Measure::B1 => nth_modulus(self.bn(0), 1),
            Measure::B2 => nth_modulus(self.bn(0), 2),
            Measure::B3 => nth_modulus(self.bn(0), 3),
            Measure::Coupling => Err(EngineError::UnsupportedMeasure(
                "coupling requires a detector".into(),
            )),
        }
    }
}
