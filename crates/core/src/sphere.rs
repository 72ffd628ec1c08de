//! Homogeneous spheres.

use num_complex::Complex64;

use crate::coefficients::{mie_ab, CoefficientSet};
use crate::cross_section::{sphere_efficiencies, Efficiencies};
use crate::error::{check_length, EngineError};
use crate::farfield::{sphere_s1s2, AmplitudePair};
use crate::geometry::RefractiveIndex;
use crate::scatterer::Scatterer;
use crate::source::OpticalSource;
use crate::truncation::wiscombe_order;

/// A homogeneous sphere in a non-absorbing medium.
///
/// Coefficients and efficiencies are computed once at construction; all
/// accessors afterwards are cheap.
#[derive(Debug, Clone)]
pub struct Sphere {
    source: OpticalSource,
    diameter: f64,
    index: RefractiveIndex,
    medium_index: f64,
    size_parameter: f64,
    max_order: usize,
    coefficients: CoefficientSet,
    efficiencies: Efficiencies,
}

impl Sphere {
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
        let size_parameter =
            std::f64::consts::PI * diameter * medium_index / source.wavelength;
        let max_order = wiscombe_order(size_parameter)?;
        let m = index.as_complex() / medium_index;
        let coefficients = mie_ab(m, size_parameter, max_order)?;
        let efficiencies = sphere_efficiencies(&coefficients, size_parameter);
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

    pub fn medium_index(&self) -> f64 {
        self.medium_index
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    /// Coefficients at an explicit truncation, recomputed when the request
    /// exceeds the stored order.
    fn coefficients_at(&self, max_order: usize) -> Result<CoefficientSet, EngineError> {
        if max_order == 0 || max_order == self.max_order {
            return Ok(self.coefficients.clone());
        }
        if max_order <= self.max_order {
            return Ok(self.coefficients.truncated(max_order));
        }
        let m = self.index.as_complex() / self.medium_index;
        mie_ab(m, self.size_parameter, max_order)
    }
}

impl Scatterer for Sphere {
    fn source(&self) -> &OpticalSource {
        &self.source
    }

    fn size_parameter(&self) -> f64 {
        self.size_parameter
    }

    fn area(&self) -> f64 {
        std::f64::consts::PI * (self.diameter / 2.0).powi(2)
    }

    fn max_order(&self) -> usize {
        self.max_order
    }

    fn an(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError> {
        Ok(self.coefficients_at(max_order)?.a)
    }

    fn bn(&self, max_order: usize) -> Result<Vec<Complex64>, EngineError> {
        Ok(self.coefficients_at(max_order)?.b)
    }

    fn s1s2(&self, angles: &[f64]) -> AmplitudePair {
        sphere_s1s2(&self.coefficients, angles)
    }

    fn qsca(&self) -> f64 {
        self.efficiencies.qsca
    }

    fn qext(&self) -> f64 {
        self.efficiencies.qext
    }

    fn g(&self) -> f64 {
        self.efficiencies.g
    }

    fn qback(&self) -> Result<f64, EngineError> {
        Ok(self.efficiencies.qback)
    }

    fn qforward(&self) -> Result<f64, EngineError> {
        Ok(self.efficiencies.qforward)
    }
}
