//! Domain checks for compositional input.
//!
//! Compositional values must be non-negative and present. The check is
//! opt-in: without it, bad input flows through the log transforms as
//! NaN/Inf.

use crate::data::LabeledMatrix;
use crate::error::{ProprError, Result};
use tracing::debug;

/// Fail on the first negative value, then on the first missing value.
///
/// Negative values are searched across the whole matrix before missing
/// values, so a matrix with both reports the negative one. Zeros pass.
pub fn check_domain(x: &LabeledMatrix) -> Result<()> {
    let data = x.matrix();
    let (nrows, ncols) = data.shape();

    for row in 0..nrows {
        for col in 0..ncols {
            let value = data[(row, col)];
            if value < 0.0 {
                return Err(ProprError::NegativeValue { value, row, col });
            }
        }
    }

    for row in 0..nrows {
        for col in 0..ncols {
            if data[(row, col)].is_nan() {
                return Err(ProprError::MissingValue { row, col });
            }
        }
    }

    debug!(nrows, ncols, "domain check passed");
    Ok(())
}

/// Run [`check_domain`] only when `check` is set.
pub fn check_if_requested(x: &LabeledMatrix, check: bool) -> Result<()> {
    if check {
        check_domain(x)
    } else {
        Ok(())
    }
}
