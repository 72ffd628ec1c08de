//! Infinite cylinders at normal incidence.

use num_complex::Complex64;

use crate::coefficients::{cylinder_ab, CylinderCoefficients};
use crate::cross_section::{cylinder_efficiencies, merge_polarizations, CylinderEfficiencies};
use crate::error::{check_length, EngineError};
use crate::farfield::{cylinder_s1s2, AmplitudePair};
use crate::geometry::RefractiveIndex;
use crate::scatterer::Scatterer;
use crate::source::OpticalSource;
use crate::truncation::wiscombe_order;

/// Mesh sampling used for the quadrature-based asymmetry parameter.
const G_QUADRATURE_SAMPLING: usize = 1000;

/// An infinite circular cylinder illuminated at normal incidence.
///
/// The size parameter here is pi d / lambda, without the medium factor;
/// the medium enters only through the relative index. Efficiencies are
/// reported per polarization case and merged with the source Jones vector.
/// Backscatter and forward-scatter efficiencies have no two-dimensional
/// counterpart and evaluate to `UnsupportedMeasure`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    source: OpticalSource,
    diameter: f64,
    index: RefractiveIndex,
    medium_index: f64,
    size_parameter: f64,
    max_order: usize,
    coefficients: CylinderCoefficients,
    efficiencies: CylinderEfficiencies,
}

impl Cylinder {
    pub fn new(
        source: OpticalSource,
        diameter: f64,
        index: RefractiveIndex,
        medium_index: f64,
    ) -> Result<Self, EngineError> {
        check_length("diameter", diameter)?;
        if !medium_index.is_finite() || medium_index <= 0.0 {
            return Err(EngineError::validation(format!(
                "medium index must be finite and positive, got {medium_index}"
            )));
        }
        let size_parameter = std::f64::consts::PI * diameter / source.wavelength;
        let max_order = wiscombe_order(size_parameter)?;
        let m = index.as_complex() / medium_index;
        let coefficients = cylinder_ab(m, size_parameter, max_order)?;
        let efficiencies = cylinder_efficiencies(&coefficients, size_parameter);
        Ok(Self {
            source,
            diameter,
            index,
            medium_index,
            size_parameter,
            max_order,
            coefficients,
            efficiencies,
        })
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn index(&self) -> RefractiveIndex {
        self.index
    }

    pub fn coefficients(&self) -> &CylinderCoefficients {
        &self.coefficients
    }

    /// Per-polarization efficiencies before the Jones merge.
    pub fn case_efficiencies(&self) -> CylinderEfficiencies {
        self.efficiencies
    }

    fn coefficients_at(&self, max_order: usize) -> Result<CylinderCoefficients, EngineError> {
        if max_order == 0 || max_order == self.max_order {
            return Ok(self.coefficients.clone());
        }
        if max_order <= self.max_order {
            return Ok(self.coefficients.truncated(max_order));
        }
        let m = self.index.as_complex() / self.medium_index;
        cylinder_ab(m, self.size_parameter, max_order)
    }
}

impl Scatterer for Cylinder {
    fn source(&self) -> &OpticalSource {
        &self.source
    }

    fn size_parameter(&self) -> f64 {
        self.size_parameter
    }

    /// Area per unit length, d x 1 m.
    fn area(&self) -> f64 {
        self.diameter
    }

    fn max_order(&self) -> usize {
        self.max_order
    }

    fn an(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError> {
        Ok(self.coefficients_at(max_order)?.a2)
    }

    fn bn(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError> {
        Ok(self.coefficients_at(max_order)?.b1)
    }

    fn s1s2(&self, angles: &[f64]) -> AmplitudePair {
        cylinder_s1s2(&self.coefficients, angles)
    }

    fn qsca(&self) -> f64 {
        merge_polarizations(
            self.efficiencies.qsca1,
            self.efficiencies.qsca2,
            self.source.jones,
        )
    }

    fn qext(&self) -> f64 {
        merge_polarizations(
            self.efficiencies.qext1,
            self.efficiencies.qext2,
            self.source.jones,
        )
    }

    fn g(&self) -> f64 {
        self.g_from_fields(G_QUADRATURE_SAMPLING)
    }

    fn qback(&self) -> Result<f64, EngineError> {
        Err(EngineError::UnsupportedMeasure(
            "Qback is not defined for an infinite cylinder".into(),
        ))
    }

    fn qforward(&self) -> Result<f64, EngineError> {
        Err(EngineError::UnsupportedMeasure(
            "Qforward is not defined for an infinite cylinder".into(),
        ))
    }
}
