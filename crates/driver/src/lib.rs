//! Multi-threaded sweep driver for the Mie scattering engine.
//!
//! This crate turns a declarative sweep over source, scatterer, and detector
//! parameters into a dense result array. It handles:
//!
//! - **Sweep definition**: TOML axes for wavelength, polarization, particle
//!   geometry and indices, and detector pointing
//! - **Job expansion**: row-major Cartesian product of every axis, or a
//!   sequential (zip) mode over same-length axes
//! - **Thread pool management**: parallel evaluation with a configurable
//!   thread count and cooperative cancellation
//! - **Progress tracking**: one progress bar, no per-thread noise
//!
//! A failed point does not abort the sweep: its slot holds NaN and the error
//! is collected in the run statistics.

pub mod config;
pub mod driver;
pub mod expansion;

pub use config::{ComplexSpec, DetectorSweep, ScattererSweep, SourceSweep, SweepConfig};
pub use driver::{BatchDriver, BatchResult, DriverError, DriverStats, JobError};
pub use expansion::{expand_jobs, expand_sequential, ExpandedJob, SweepAxis};

#[cfg(test)]
mod _tests_driver;
