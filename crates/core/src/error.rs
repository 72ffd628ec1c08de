//! Engine error taxonomy.
//!
//! Upstream callers are expected to have validated physical parameters
//! already; the engine still rejects non-finite or non-physical inputs
//! itself rather than letting NaN propagate through the recursions.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Non-physical or non-finite input (negative length, bad index, ...).
    #[error("invalid parameter: {0}")]
    Validation(String),

    /// A recursion produced non-finite intermediates or the truncation
    /// order exceeded the engine ceiling. Deterministic for given inputs;
    /// retrying unchanged inputs is pointless.
    #[error("numeric instability: {0}")]
    NumericInstability(String),

    /// Unknown measure name, or a measure the scatterer variant does not
    /// provide. Reported before any computation starts.
    #[error("unsupported measure: {0}")]
    UnsupportedMeasure(String),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn instability(msg: impl Into<String>) -> Self {
        Self::NumericInstability(msg.into())
    }
}

/// Reject a non-finite or non-positive length (meters).
pub fn check_length(name: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::validation(format!(
            "{name} must be a finite positive length, got {value}"
        )));
    }
    Ok(())
}
