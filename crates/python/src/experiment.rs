//! Python sweep interface.
//!
//! Wraps the batch driver behind an `Experiment` class: load a TOML sweep
//! declaration, then pull dense measure arrays out of it.
//!
//! # Example Usage (Python)
//!
//! ```python
//! from miekit import Experiment
//!
//! exp = Experiment("sweep.toml")
//! print(f"Will evaluate {exp.job_count} points")
//!
//! values, shape = exp.get("Qsca")
//! import numpy as np
//! qsca = np.asarray(values).reshape(shape)
//! ```

use std::path::PathBuf;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use miekit_core::Measure;
use miekit_driver::{BatchDriver, BatchResult, SweepConfig};

fn parse_measure(name: &str) -> PyResult<Measure> {
    name.parse()
        .map_err(|e| PyValueError::new_err(format!("{e}")))
}

fn result_to_py(py: Python<'_>, result: &BatchResult) -> PyResult<(Vec<f64>, Vec<usize>)> {
    if result.stats.failed > 0 {
        let warnings = py.import_bound("warnings")?;
        warnings.call_method1(
            "warn",
            (format!(
                "{} of {} points failed and hold NaN",
                result.stats.failed, result.stats.total_jobs
            ),),
        )?;
    }
    Ok((result.values.clone(), result.shape.clone()))
}

/// Parameter-sweep experiment over one scatterer family.
///
/// Example:
///     exp = Experiment("sweep.toml")
///     values, shape = exp.get("Qsca")
#[pyclass(name = "Experiment")]
pub struct ExperimentPy {
    config_path: PathBuf,
    config: SweepConfig,
    threads: Option<usize>,
}

#[pymethods]
impl ExperimentPy {
    /// Load a sweep declaration from a TOML file.
    ///
    /// Args:
    ///     config_path: Path to the sweep TOML file
    ///     threads: Worker threads (0 for all logical CPUs)
    #[new]
    #[pyo3(signature = (config_path, threads=0))]
    fn new(config_path: &str, threads: usize) -> PyResult<Self> {
        let path = PathBuf::from(config_path);
        if !path.exists() {
            return Err(PyValueError::new_err(format!(
                "configuration file not found: {config_path}"
            )));
        }
        let config = SweepConfig::from_path(&path)
            .map_err(|e| PyValueError::new_err(format!("invalid configuration: {e}")))?;
        Ok(Self {
            config_path: path,
            config,
            threads: if threads == 0 { None } else { Some(threads) },
        })
    }

    /// Number of points in the Cartesian product.
    #[getter]
    fn job_count(&self) -> PyResult<usize> {
        let driver = self.driver()?;
        Ok(driver.job_count())
    }

    /// Axis names and lengths, in declaration order.
    #[getter]
    fn axes(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let driver = self.driver()?;
        let dict = PyDict::new_bound(py);
        for axis in driver.axes() {
            dict.set_item(axis.name, axis.len)?;
        }
        Ok(dict.into())
    }

    #[getter]
    fn config_path(&self) -> String {
        self.config_path.to_string_lossy().to_string()
    }

    /// Evaluate one measure over the full Cartesian product.
    ///
    /// Returns:
    ///     (values, shape): flat row-major list plus the axis lengths in
    ///     declaration order, ready for numpy reshape.
    #[pyo3(name = "get")]
    fn get(&self, py: Python<'_>, measure: &str) -> PyResult<(Vec<f64>, Vec<usize>)> {
        let measure = parse_measure(measure)?;
        let driver = self.driver()?;
        let result = py
            .allow_threads(|| driver.run(measure))
            .map_err(|e| PyRuntimeError::new_err(format!("driver error: {e}")))?;
        result_to_py(py, &result)
    }

    /// Evaluate one measure with the axes zipped elementwise.
    ///
    /// Every axis must share one length (or have length one, which is
    /// broadcast). Returns a 1-D result.
    #[pyo3(name = "get_sequential")]
    fn get_sequential(&self, py: Python<'_>, measure: &str) -> PyResult<(Vec<f64>, Vec<usize>)> {
        let measure = parse_measure(measure)?;
        let driver = self.driver()?;
        let result = py
            .allow_threads(|| driver.run_sequential(measure))
            .map_err(|e| PyRuntimeError::new_err(format!("driver error: {e}")))?;
        result_to_py(py, &result)
    }

    /// Names of the parameter columns, complex indices split into
    /// `_re`/`_im` pairs.
    #[getter]
    fn columns(&self) -> Vec<String> {
        miekit_driver::expansion::column_names(&self.config)
    }

    fn __repr__(&self) -> String {
        format!(
            "Experiment('{}', threads={})",
            self.config_path.display(),
            match self.threads {
                Some(n) => n.to_string(),
                None => "auto".to_string(),
            }
        )
    }
}

impl ExperimentPy {
    fn driver(&self) -> PyResult<BatchDriver> {
        BatchDriver::new(self.config.clone(), self.threads)
            .map(|driver| driver.quiet(true))
            .map_err(|e| PyValueError::new_err(format!("{e}")))
    }
}

/// List the measure names the engine understands.
#[pyfunction]
pub fn measures() -> Vec<String> {
    Measure::ALL.iter().map(|m| m.to_string()).collect()
}

pub fn register_experiment(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ExperimentPy>()?;
    m.add_function(wrap_pyfunction!(measures, m)?)?;
    Ok(())
}
