//! Core math, physics, and APIs for the Mie scattering engine.

pub mod coefficients;
pub mod coreshell;
pub mod cross_section;
pub mod cylinder;
pub mod detector;
pub mod error;
pub mod evaluate;
pub mod farfield;
pub mod geometry;
pub mod measure;
pub mod mesh;
pub mod scatterer;
pub mod source;
pub mod special;
pub mod sphere;
pub mod truncation;

pub use coefficients::CoefficientSet;
pub use error::EngineError;
pub use measure::Measure;
pub use scatterer::Scatterer;

#[cfg(test)]
mod _tests_coefficients;
#[cfg(test)]
mod _tests_cross_section;
#[cfg(test)]
mod _tests_evaluate;
#[cfg(test)]
mod _tests_special;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Vacuum permittivity (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_8128e-12;
