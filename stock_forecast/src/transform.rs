//! Stabilizing transform between price space and model space
//!
//! Raw closes are positive but range over orders of magnitude across a
//! five-year window, so the model is fitted on `ln(1 + x)` values. The
//! inverse applies `exp(x) - 1` and clamps at zero: a model's lower band
//! can invert to a small negative price.

use crate::error::{ForecastError, Result};

/// Map raw prices into stabilized model space, element-wise `ln(1 + x)`
pub fn stabilize(values: &[f64]) -> Result<Vec<f64>> {
    if let Some(v) = values.iter().find(|v| **v < 0.0) {
        return Err(ForecastError::InvalidInput(format!(
            "cannot stabilize negative value {v}"
        )));
    }

    Ok(values.iter().map(|v| v.ln_1p()).collect())
}

/// Map stabilized values back to price space, element-wise `exp(x) - 1`,
/// clamped to `[0, ∞)`
pub fn destabilize(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.exp_m1().max(0.0)).collect()
}
