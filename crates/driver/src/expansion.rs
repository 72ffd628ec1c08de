//! Job expansion from sweep axes.
//!
//! Expands a `SweepConfig` into concrete evaluation points, either as the
//! row-major Cartesian product of every axis or, in sequential mode, by
//! zipping same-length axes elementwise.

use miekit_core::detector::Detector;
use miekit_core::geometry::{ScattererGeometry, ScattererOptics};
use miekit_core::source::OpticalSource;

use crate::config::{ComplexSpec, DetectorSweep, ScattererSweep, SourceSweep, SweepConfig};
use crate::driver::DriverError;

/// One sweep dimension: its name and the number of values it contributes.
/// Axis declaration order is iteration order, the last axis varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAxis {
    pub name: &'static str,
    pub len: usize,
}

/// A fully resolved evaluation point.
#[derive(Debug, Clone)]
pub struct EvalPoint {
    pub geometry: ScattererGeometry,
    pub optics: ScattererOptics,
    pub source: OpticalSource,
    pub detector: Option<Detector>,
}

/// A single expanded job: the point to evaluate plus the concrete axis
/// values that produced it (one f64 per output column, for labeling).
#[derive(Debug, Clone)]
pub struct ExpandedJob {
    /// Row-major index into the result array.
    pub index: usize,
    pub point: EvalPoint,
    pub values: Vec<f64>,
}

enum AxisValues {
    Scalar(Vec<f64>),
    Index(Vec<ComplexSpec>),
}

impl AxisValues {
    fn len(&self) -> usize {
        match self {
            AxisValues::Scalar(v) => v.len(),
            AxisValues::Index(v) => v.len(),
        }
    }
}

struct AxisTable {
    axes: Vec<(&'static str, AxisValues)>,
}

impl AxisTable {
    /// Axes in iteration order: source, then scatterer, then detector.
    fn build(config: &SweepConfig) -> Self {
        let mut axes: Vec<(&'static str, AxisValues)> = vec![
            (
                "wavelength",
                AxisValues::Scalar(config.source.wavelength.clone()),
            ),
            (
                "polarization",
                AxisValues::Scalar(config.source.polarization.clone()),
            ),
        ];
        match &config.scatterer {
            ScattererSweep::Sphere {
                diameter,
                index,
                medium,
            }
            | ScattererSweep::Cylinder {
                diameter,
                index,
                medium,
            } => {
                axes.push(("diameter", AxisValues::Scalar(diameter.clone())));
                axes.push(("index", AxisValues::Index(index.clone())));
                axes.push(("medium", AxisValues::Scalar(medium.clone())));
            }
            ScattererSweep::CoreShell {
                core_diameter,
                shell_width,
                core_index,
                shell_index,
                medium,
            } => {
                axes.push(("core_diameter", AxisValues::Scalar(core_diameter.clone())));
                axes.push(("shell_width", AxisValues::Scalar(shell_width.clone())));
                axes.push(("core_index", AxisValues::Index(core_index.clone())));
                axes.push(("shell_index", AxisValues::Index(shell_index.clone())));
                axes.push(("medium", AxisValues::Scalar(medium.clone())));
            }
        }
        if let Some(detector) = &config.detector {
            axes.push((
                "detector_na",
                AxisValues::Scalar(detector.numerical_aperture.clone()),
            ));
            axes.push(("phi_offset", AxisValues::Scalar(detector.phi_offset.clone())));
            axes.push((
                "gamma_offset",
                AxisValues::Scalar(detector.gamma_offset.clone()),
            ));
            if let Some(filters) = &detector.polarization_filter {
                axes.push(("polarization_filter", AxisValues::Scalar(filters.clone())));
            }
        }
        Self { axes }
    }

    fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|(_, v)| v.len()).collect()
    }

    fn total(&self) -> usize {
        self.shape().iter().product()
    }

    /// Row-major decomposition of a flat index into per-axis indices
    /// (last axis varies fastest).
    fn decompose(&self, flat: usize) -> Vec<usize> {
        let shape = self.shape();
        let mut remainder = flat;
        let mut indices = vec![0; shape.len()];
        for (slot, &len) in indices.iter_mut().zip(shape.iter()).rev() {
            *slot = remainder % len;
            remainder /= len;
        }
        indices
    }
}

/// Public axis summary, in declaration order.
pub fn sweep_axes(config: &SweepConfig) -> Vec<SweepAxis> {
    AxisTable::build(config)
        .axes
        .iter()
        .map(|(name, values)| SweepAxis {
            name: *name,
            len: values.len(),
        })
        .collect()
}

/// Output column names; complex-index axes contribute a `_re`/`_im` pair.
pub fn column_names(config: &SweepConfig) -> Vec<String> {
    let table = AxisTable::build(config);
    let mut names = Vec::new();
    for (name, values) in &table.axes {
        match values {
            AxisValues::Scalar(_) => names.push((*name).to_string()),
            AxisValues::Index(_) => {
                names.push(format!("{name}_re"));
                names.push(format!("{name}_im"));
            }
        }
    }
    names
}

/// Expand the full Cartesian product, row-major over the declared axes.
/// An empty axis yields zero jobs.
pub fn expand_jobs(config: &SweepConfig) -> Result<Vec<ExpandedJob>, DriverError> {
    let table = AxisTable::build(config);
    let total = table.total();
    let mut jobs = Vec::with_capacity(total);
    for flat in 0..total {
        let indices = table.decompose(flat);
        jobs.push(build_job(config, &table, flat, &indices)?);
    }
    Ok(jobs)
}

/// Expand in sequential (zip) mode: every axis must have the same length or
/// length one (broadcast). Produces a 1-D job list.
pub fn expand_sequential(config: &SweepConfig) -> Result<Vec<ExpandedJob>, DriverError> {
    let table = AxisTable::build(config);
    let mut run_length = 1usize;
    for (name, values) in &table.axes {
        let len = values.len();
        if len == 0 {
            return Ok(Vec::new());
        }
        if len != 1 {
            if run_length != 1 && len != run_length {
                return Err(DriverError::ConfigError(format!(
                    "sequential mode needs equal axis lengths, but `{name}` has {len} \
                     values where {run_length} were expected"
                )));
            }
            run_length = len;
        }
    }
    let mut jobs = Vec::with_capacity(run_length);
    for flat in 0..run_length {
        let indices: Vec<usize> = table
            .axes
            .iter()
            .map(|(_, values)| if values.len() == 1 { 0 } else { flat })
            .collect();
        jobs.push(build_job(config, &table, flat, &indices)?);
    }
    Ok(jobs)
}

fn build_job(
    config: &SweepConfig,
    table: &AxisTable,
    index: usize,
    indices: &[usize],
) -> Result<ExpandedJob, DriverError> {
    let mut values = Vec::new();

    // Source axes.
    let wavelength = scalar_at(table, 0, indices);
    let polarization = scalar_at(table, 1, indices);
    values.push(wavelength);
    values.push(polarization);
    let source = build_source(&config.source, wavelength, polarization)
        .map_err(|e| DriverError::ConfigError(e.to_string()))?;

    // Scatterer axes.
    let mut axis = 2;
    let (geometry, optics) = match &config.scatterer {
        ScattererSweep::Sphere { .. } | ScattererSweep::Cylinder { .. } => {
            let diameter = scalar_at(table, axis, indices);
            let index_spec = index_at(table, axis + 1, indices);
            let medium = scalar_at(table, axis + 2, indices);
            values.push(diameter);
            values.push(index_spec.re);
            values.push(index_spec.im);
            values.push(medium);
            axis += 3;
            let core = index_spec
                .to_index()
                .map_err(|e| DriverError::ConfigError(e.to_string()))?;
            let geometry = match &config.scatterer {
                ScattererSweep::Cylinder { .. } => ScattererGeometry::Cylinder { diameter },
                _ => ScattererGeometry::Sphere { diameter },
            };
            (
                geometry,
                ScattererOptics {
                    core,
                    shell: None,
                    medium,
                },
            )
        }
        ScattererSweep::CoreShell { .. } => {
            let core_diameter = scalar_at(table, axis, indices);
            let shell_width = scalar_at(table, axis + 1, indices);
            let core_spec = index_at(table, axis + 2, indices);
            let shell_spec = index_at(table, axis + 3, indices);
            let medium = scalar_at(table, axis + 4, indices);
            values.push(core_diameter);
            values.push(shell_width);
            values.push(core_spec.re);
            values.push(core_spec.im);
            values.push(shell_spec.re);
            values.push(shell_spec.im);
            values.push(medium);
            axis += 5;
            let core = core_spec
                .to_index()
                .map_err(|e| DriverError::ConfigError(e.to_string()))?;
            let shell = shell_spec
                .to_index()
                .map_err(|e| DriverError::ConfigError(e.to_string()))?;
            (
                ScattererGeometry::CoreShell {
                    core_diameter,
                    shell_width,
                },
                ScattererOptics {
                    core,
                    shell: Some(shell),
                    medium,
                },
            )
        }
    };

    // Detector axes.
    let detector = match &config.detector {
        Some(sweep) => Some(build_detector(sweep, table, axis, indices, &mut values)?),
        None => None,
    };

    Ok(ExpandedJob {
        index,
        point: EvalPoint {
            geometry,
            optics,
            source,
            detector,
        },
        values,
    })
}

fn scalar_at(table: &AxisTable, axis: usize, indices: &[usize]) -> f64 {
    match &table.axes[axis].1 {
        AxisValues::Scalar(v) => v[indices[axis]],
        AxisValues::Index(_) => unreachable!("scalar axis expected at {axis}"),
    }
}

fn index_at(table: &AxisTable, axis: usize, indices: &[usize]) -> ComplexSpec {
    match &table.axes[axis].1 {
        AxisValues::Index(v) => v[indices[axis]],
        AxisValues::Scalar(_) => unreachable!("index axis expected at {axis}"),
    }
}

fn build_source(
    sweep: &SourceSweep,
    wavelength: f64,
    polarization: f64,
) -> Result<OpticalSource, miekit_core::EngineError> {
    match (sweep.amplitude, sweep.optical_power, sweep.numerical_aperture) {
        (Some(amplitude), _, _) => {
            OpticalSource::plane_wave(wavelength, polarization, amplitude)
        }
        (None, Some(power), Some(na)) => {
            OpticalSource::gaussian(wavelength, polarization, power, na)
        }
        _ => unreachable!("checked by SweepConfig::validate"),
    }
}

fn build_detector(
    sweep: &DetectorSweep,
    table: &AxisTable,
    axis: usize,
    indices: &[usize],
    values: &mut Vec<f64>,
) -> Result<Detector, DriverError> {
    let na = scalar_at(table, axis, indices);
    let phi = scalar_at(table, axis + 1, indices);
    let gamma = scalar_at(table, axis + 2, indices);
    values.push(na);
    values.push(phi);
    values.push(gamma);
    let filter = if sweep.polarization_filter.is_some() {
        let f = scalar_at(table, axis + 3, indices);
        values.push(f);
        Some(f)
    } else {
        None
    };
    Detector::new(sweep.sampling, na, gamma, phi, filter, sweep.mean_coupling)
        .map_err(|e| DriverError::ConfigError(e.to_string()))
}
