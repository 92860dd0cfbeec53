//! Pseudocount addition for zero handling.

use crate::data::LabeledMatrix;
use crate::error::{ProprError, Result};

/// Add a pseudocount to all entries.
///
/// Log-ratio statistics are undefined at zero. Adding the same constant to
/// every entry (both zero and non-zero) keeps the matrix dense and positive.
///
/// # Common choices
/// - 0.5: Often used as a compromise
/// - 1.0: Laplace smoothing, simple and interpretable
pub fn add_pseudocount(x: &LabeledMatrix, pseudocount: f64) -> Result<LabeledMatrix> {
    if pseudocount.is_nan() || pseudocount <= 0.0 {
        return Err(ProprError::InvalidParameter(
            "Pseudocount must be positive".to_string(),
        ));
    }
    Ok(x.with_data(x.matrix().add_scalar(pseudocount)))
}

/// Replace exact zeros with `value`, leaving other entries untouched.
pub fn replace_zeros(x: &LabeledMatrix, value: f64) -> Result<LabeledMatrix> {
    if value.is_nan() || value <= 0.0 {
        return Err(ProprError::InvalidParameter(
            "Zero replacement must be positive".to_string(),
        ));
    }
    Ok(x.with_data(x.matrix().map(|v| if v == 0.0 { value } else { v })))
}
