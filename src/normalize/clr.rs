//! Centered Log-Ratio (CLR) transformation for compositional data.

use crate::data::LabeledMatrix;
use crate::error::Result;
use crate::validate::check_if_requested;
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

/// Apply Centered Log-Ratio (CLR) transformation.
///
/// CLR transforms compositional data by taking the log of each value
/// divided by the geometric mean of its observation. This removes the
/// simplex constraint and allows standard statistical methods.
///
/// # Formula
/// For observation i: CLR(x_ij) = log(x_ij) - mean_k(log(x_ik))
///
/// # Arguments
/// * `x` - Observations × features
/// * `check` - Reject negative and missing values before computing
///
/// # Note
/// Zeros are not rejected even with `check`; their log is -Inf and the
/// whole row degrades to NaN/Inf.
pub fn clr(x: &LabeledMatrix, check: bool) -> Result<LabeledMatrix> {
    check_if_requested(x, check)?;
    debug!(nrows = x.nrows(), ncols = x.ncols(), "applying clr");

    Ok(x.with_data(clr_matrix(x.matrix())))
}

pub(crate) fn clr_matrix(data: &DMatrix<f64>) -> DMatrix<f64> {
    let log_data: DMatrix<f64> = data.map(|v| v.ln());
    let (nrows, ncols) = log_data.shape();

    // mean(log(x_i)) = log(geometric_mean(x_i))
    let log_geom_means: Vec<f64> = (0..nrows)
        .into_par_iter()
        .map(|i| log_data.row(i).sum() / ncols as f64)
        .collect();

    DMatrix::from_fn(nrows, ncols, |i, j| log_data[(i, j)] - log_geom_means[i])
}
