//! Closure of compositional data.

use crate::data::LabeledMatrix;
use crate::error::Result;
use crate::validate::check_if_requested;
use nalgebra::DMatrix;
use tracing::debug;

/// Close each row so it sums to one.
///
/// # Formula
/// For observation i: clo(x_ij) = x_ij / sum_k(x_ik)
///
/// A row summing to zero becomes NaN/Inf; nothing is clamped.
///
/// # Arguments
/// * `x` - Observations × features
/// * `check` - Reject negative and missing values before computing
pub fn clo(x: &LabeledMatrix, check: bool) -> Result<LabeledMatrix> {
    check_if_requested(x, check)?;
    debug!(nrows = x.nrows(), ncols = x.ncols(), "closing rows");

    let data = x.matrix();
    let sums = x.row_sums();
    let closed = DMatrix::from_fn(data.nrows(), data.ncols(), |i, j| data[(i, j)] / sums[i]);

    Ok(x.with_data(closed))
}
