//! Series truncation policy.

use crate::error::EngineError;

/// Hard ceiling on the multipole order. Size parameters that would require
/// more terms than this are outside the engine's validated regime.
pub const MAX_ORDER: usize = 2048;

/// Wiscombe's criterion: N = round(x + 4 x^(1/3) + 2), clamped to at least 1.
///
/// Returns `NumericInstability` when the resulting order would exceed
/// [`MAX_ORDER`], and `Validation` for a negative or non-finite size
/// parameter.
pub fn wiscombe_order(x: f64) -> Result<usize, EngineError> {
    if !x.is_finite() || x < 0.0 {
        return Err(EngineError::validation(format!(
            "size parameter must be finite and non-negative, got {x}"
        )));
    }
    let raw = (x + 4.0 * x.cbrt() + 2.0).round();
    let order = (raw as usize).max(1);
    if order > MAX_ORDER {
        return Err(EngineError::instability(format!(
            "size parameter {x} requires multipole order {order}, above the supported maximum {MAX_ORDER}"
        )));
    }
    Ok(order)
}
