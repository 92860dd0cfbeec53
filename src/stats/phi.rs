//! Proportionality statistics built on log-ratio variance.
//!
//! - **phisym**: symmetric phi, from clr-space covariance
//! - **phi**: vlr scaled by the clr variance of the column feature
//! - **rho**: one minus vlr scaled by the summed clr variances

use crate::data::LabeledMatrix;
use crate::normalize::clr::clr_matrix;
use crate::stats::covariance::{column_variances, covariance_matrix};
use crate::stats::vlr::vlr_matrix;
use nalgebra::DMatrix;
use tracing::debug;

/// Symmetric phi of data already in clr space.
///
/// # Formula
/// t = 2 cov(i, j) / (var_i + var_j)
/// phisym(i, j) = (1 - t) / (1 + t)
///
/// The diagonal is 0. A pair whose variances sum to zero is NaN.
pub fn phisym(x_clr: &LabeledMatrix) -> LabeledMatrix {
    debug!(ncols = x_clr.ncols(), "computing phisym");
    LabeledMatrix::square(phisym_matrix(x_clr.matrix()), x_clr.col_ids())
}

pub(crate) fn phisym_matrix(clr_data: &DMatrix<f64>) -> DMatrix<f64> {
    let cov = covariance_matrix(clr_data);
    let d = cov.ncols();
    DMatrix::from_fn(d, d, |i, j| {
        let t = 2.0 * cov[(i, j)] / (cov[(i, i)] + cov[(j, j)]);
        (1.0 - t) / (1.0 + t)
    })
}

/// Asymmetric phi from raw data.
///
/// phi(i, j) = vlr(i, j) / var(clr_j). Row `i` and column `j` are not
/// interchangeable.
pub fn phi(x: &LabeledMatrix) -> LabeledMatrix {
    debug!(ncols = x.ncols(), "computing phi");
    let clr_var = column_variances(&clr_matrix(x.matrix()));
    LabeledMatrix::square(
        phi_from_parts(&vlr_matrix(x.matrix()), &clr_var),
        x.col_ids(),
    )
}

pub(crate) fn phi_from_parts(vlr: &DMatrix<f64>, clr_var: &[f64]) -> DMatrix<f64> {
    let d = vlr.ncols();
    DMatrix::from_fn(d, d, |i, j| vlr[(i, j)] / clr_var[j])
}

/// Proportionality coefficient rho from raw data.
///
/// rho(i, j) = 1 - vlr(i, j) / (var(clr_i) + var(clr_j))
///
/// Symmetric, 1 on the diagonal, and 1 for perfectly proportional pairs.
pub fn rho(x: &LabeledMatrix) -> LabeledMatrix {
    debug!(ncols = x.ncols(), "computing rho");
    let clr_var = column_variances(&clr_matrix(x.matrix()));
    let vlr = vlr_matrix(x.matrix());
    let d = vlr.ncols();
    let data = DMatrix::from_fn(d, d, |i, j| 1.0 - vlr[(i, j)] / (clr_var[i] + clr_var[j]));
    LabeledMatrix::square(data, x.col_ids())
}
