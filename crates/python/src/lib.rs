//! Python bindings for miekit.
//!
//! Exposes the sweep driver to Python as an `Experiment` class: declare the
//! parameter axes in TOML, then pull dense row-major measure arrays that
//! reshape directly into numpy.
//!
//! # Example
//!
//! ```python
//! from miekit import Experiment, measures
//!
//! exp = Experiment("sweep.toml")
//! print(f"Will evaluate {exp.job_count} points")
//!
//! values, shape = exp.get("Qsca")
//! coupling, _ = exp.get("coupling")
//! ```

#[cfg(feature = "bindings")]
mod experiment;

#[cfg(feature = "bindings")]
mod py {
    use pyo3::prelude::*;

    use crate::experiment;

    /// miekit Python module.
    #[pymodule]
    fn miekit(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add("__doc__", "miekit: Mie scattering engine with batch sweeps")?;
        m.add("__version__", env!("CARGO_PKG_VERSION"))?;

        experiment::register_experiment(m)?;

        Ok(())
    }
}

#[cfg(not(feature = "bindings"))]
pub fn bindings_disabled() {
    log::warn!("miekit-python compiled without the \"bindings\" feature");
}
