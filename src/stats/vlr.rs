//! Variance of log-ratios.

use crate::data::LabeledMatrix;
use crate::error::Result;
use crate::stats::covariance::covariance_matrix;
use crate::validate::check_if_requested;
use nalgebra::DMatrix;
use tracing::debug;

/// Variance of the log-ratio for every feature pair.
///
/// Takes raw (untransformed) positive data and logs it internally.
///
/// # Formula
/// vlr(i, j) = var(log x_i) + var(log x_j) - 2 cov(log x_i, log x_j)
///           = var(log(x_i / x_j))
///
/// # Note
/// `check` inspects the raw input only. A zero passes the gate and its
/// log is -Inf, which turns the affected entries into NaN.
pub fn vlr(x: &LabeledMatrix, check: bool) -> Result<LabeledMatrix> {
    check_if_requested(x, check)?;
    debug!(nrows = x.nrows(), ncols = x.ncols(), "computing vlr");

    Ok(LabeledMatrix::square(vlr_matrix(x.matrix()), x.col_ids()))
}

pub(crate) fn vlr_matrix(data: &DMatrix<f64>) -> DMatrix<f64> {
    let log_data = data.map(|v| v.ln());
    vlr_from_cov(&covariance_matrix(&log_data))
}

pub(crate) fn vlr_from_cov(cov: &DMatrix<f64>) -> DMatrix<f64> {
    let d = cov.ncols();
    DMatrix::from_fn(d, d, |i, j| cov[(i, i)] + cov[(j, j)] - 2.0 * cov[(i, j)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_data() -> LabeledMatrix {
        LabeledMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 2.0, 7.0,
                2.0, 4.4, 3.0,
                3.0, 5.7, 9.0,
                4.0, 8.2, 1.0,
            ],
            (1..=4).map(|i| format!("S{}", i)).collect(),
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap()
    }

    fn sample_variance(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    }

    #[test]
    fn test_vlr_matches_log_ratio_variance() {
        let x = create_test_data();
        let result = vlr(&x, false).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let ratios: Vec<f64> = (0..4).map(|k| (x.get(k, i) / x.get(k, j)).ln()).collect();
                assert_relative_eq!(result.get(i, j), sample_variance(&ratios), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_vlr_symmetric_zero_diagonal() {
        let result = vlr(&create_test_data(), false).unwrap();
        assert!(result.is_symmetric(0.0));
        for i in 0..3 {
            assert_eq!(result.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_vlr_labels() {
        let result = vlr(&create_test_data(), false).unwrap();
        assert_eq!(result.row_ids(), &["a", "b", "c"]);
        assert_eq!(result.col_ids(), &["a", "b", "c"]);
    }

    #[test]
    fn test_vlr_proportional_pair_is_zero() {
        let x = LabeledMatrix::from_row_slice(
            3,
            2,
            &[1.0, 3.0, 2.0, 6.0, 5.0, 15.0],
            vec!["S1".into(), "S2".into(), "S3".into()],
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        let result = vlr(&x, false).unwrap();
        assert_relative_eq!(result.get(0, 1), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vlr_check() {
        let mut data = create_test_data().into_matrix();
        data[(1, 1)] = -2.0;
        let x = LabeledMatrix::with_default_labels(data.clone());
        assert!(vlr(&x, true).unwrap_err().is_domain_error());

        data[(1, 1)] = f64::NAN;
        let x = LabeledMatrix::with_default_labels(data);
        assert!(vlr(&x, true).unwrap_err().is_domain_error());
        assert!(vlr(&x, false).unwrap().get(0, 1).is_nan());
    }
}
