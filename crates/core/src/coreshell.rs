//! Coated (core-shell) spheres.

use num_complex::Complex64;

use crate::coefficients::{coated_ab, CoefficientSet};
use crate::cross_section::{sphere_efficiencies, Efficiencies};
use crate::error::{check_length, EngineError};
use crate::farfield::{sphere_s1s2, AmplitudePair};
use crate::geometry::RefractiveIndex;
use crate::scatterer::Scatterer;
use crate::source::OpticalSource;
use crate::truncation::wiscombe_order;

/// A concentric core-shell sphere. The truncation order follows the outer
/// size parameter; a zero-width shell reproduces the homogeneous sphere.
#[derive(Debug, Clone)]
pub struct CoreShell {
    source: OpticalSource,
    core_diameter: f64,
    shell_width: f64,
    core_index: RefractiveIndex,
    shell_index: RefractiveIndex,
    medium_index: f64,
    core_size_parameter: f64,
    size_parameter: f64,
    max_order: usize,
    coefficients: CoefficientSet,
    efficiencies: Efficiencies,
}

impl CoreShell {
    pub fn new(
        source: OpticalSource,
        core_diameter: f64,
        shell_width: f64,
        core_index: RefractiveIndex,
        shell_index: RefractiveIndex,
        medium_index: f64,
    ) -> Result<Self, EngineError> {
        check_length("core_diameter", core_diameter)?;
        if !shell_width.is_finite() || shell_width < 0.0 {
            return Err(EngineError::validation(format!(
                "shell_width must be finite and non-negative, got {shell_width}"
            )));
        }
        if !medium_index.is_finite() || medium_index <= 0.0 {
            return Err(EngineError::validation(format!(
                "medium index must be finite and positive, got {medium_index}"
            )));
        }
        let outer_diameter = core_diameter + 2.0 * shell_width;
        let k_medium = std::f64::consts::PI * medium_index / source.wavelength;
        let core_size_parameter = k_medium * core_diameter;
        let size_parameter = k_medium * outer_diameter;
        let max_order = wiscombe_order(size_parameter)?;
        let m1 = core_index.as_complex() / medium_index;
        let m2 = shell_index.as_complex() / medium_index;
        let coefficients =
            coated_ab(m1, m2, core_size_parameter, size_parameter, max_order)?;
        let efficiencies = sphere_efficiencies(&coefficients, size_parameter);
        Ok(Self {
            source,
            core_diameter,
            shell_width,
            core_index,
            shell_index,
            medium_index,
            core_size_parameter,
            size_parameter,
            max_order,
            coefficients,
            efficiencies,
        })
    }

    pub fn core_diameter(&self) -> f64 {
        self.core_diameter
    }

    pub fn shell_width(&self) -> f64 {
        self.shell_width
    }

    pub fn outer_diameter(&self) -> f64 {
        self.core_diameter + 2.0 * self.shell_width
    }

    pub fn core_index(&self) -> RefractiveIndex {
        self.core_index
    }

    pub fn shell_index(&self) -> RefractiveIndex {
        self.shell_index
    }

    pub fn core_size_parameter(&self) -> f64 {
        self.core_size_parameter
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    fn coefficients_at(&self, max_order: usize) -> Result<CoefficientSet, EngineError> {
        if max_order == 0 || max_order == self.max_order {
            return Ok(self.coefficients.clone());
        }
        if max_order <= self.max_order {
            return Ok(self.coefficients.truncated(max_order));
        }
        let m1 = self.core_index.as_complex() / self.medium_index;
        let m2 = self.shell_index.as_complex() / self.medium_index;
        coated_ab(
            m1,
            m2,
            self.core_size_parameter,
            self.size_parameter,
            max_order,
        )
    }
}

impl Scatterer for CoreShell {
    fn source(&self) -> &OpticalSource {
        &self.source
    }

    fn size_parameter(&self) -> f64 {
        self.size_parameter
    }

    fn area(&self) -> f64 {
        std::f64::consts::PI * (self.outer_diameter() / 2.0).powi(2)
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
