//! Column covariance and correlation.
//!
//! Two missing-data policies are provided:
//! - [`covariance`]: every row is used, so a NaN in a column spreads to all
//!   of that column's entries.
//! - `pairwise_moments`: each pair is computed from the rows where both
//!   columns are present. Used by the SMA fit.

use crate::data::LabeledMatrix;
use nalgebra::DMatrix;
use rayon::prelude::*;

/// Pairwise-complete covariance and correlation matrices.
#[derive(Debug, Clone)]
pub(crate) struct PairwiseMoments {
    /// Covariance of each column pair over its complete rows.
    pub(crate) cov: DMatrix<f64>,
    /// Pearson correlation of each column pair over its complete rows.
    pub(crate) cor: DMatrix<f64>,
}

/// Sample covariance (N-1 denominator) of the columns of `x`, all rows used.
pub fn covariance(x: &LabeledMatrix) -> LabeledMatrix {
    LabeledMatrix::square(covariance_matrix(x.matrix()), x.col_ids())
}

/// Sample variance of each column, all rows used.
pub(crate) fn column_variances(data: &DMatrix<f64>) -> Vec<f64> {
    let n = data.nrows() as f64;
    (0..data.ncols())
        .into_par_iter()
        .map(|j| {
            let col = data.column(j);
            let mean = col.sum() / n;
            col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        })
        .collect()
}

pub(crate) fn covariance_matrix(data: &DMatrix<f64>) -> DMatrix<f64> {
    let (n, d) = data.shape();
    let nf = n as f64;
    let means: Vec<f64> = (0..d).map(|j| data.column(j).sum() / nf).collect();

    let rows: Vec<Vec<f64>> = (0..d)
        .into_par_iter()
        .map(|i| {
            (0..d)
                .map(|j| {
                    let s: f64 = (0..n)
                        .map(|k| (data[(k, i)] - means[i]) * (data[(k, j)] - means[j]))
                        .sum();
                    s / (nf - 1.0)
                })
                .collect()
        })
        .collect();

    DMatrix::from_fn(d, d, |i, j| rows[i][j])
}

/// Covariance and correlation with pairwise-complete observations.
///
/// For each column pair, rows with a NaN in either column are dropped for
/// that pair only. Pairs with fewer than two complete rows are NaN.
/// Correlations are clamped to [-1, 1].
pub(crate) fn pairwise_moments(data: &DMatrix<f64>) -> PairwiseMoments {
    let d = data.ncols();

    let lower: Vec<Vec<(f64, f64)>> = (0..d)
        .into_par_iter()
        .map(|i| (0..=i).map(|j| complete_pair(data, i, j)).collect())
        .collect();

    let mut cov = DMatrix::zeros(d, d);
    let mut cor = DMatrix::zeros(d, d);
    for (i, row) in lower.iter().enumerate() {
        for (j, &(c, r)) in row.iter().enumerate() {
            cov[(i, j)] = c;
            cov[(j, i)] = c;
            cor[(i, j)] = r;
            cor[(j, i)] = r;
        }
    }

    PairwiseMoments { cov, cor }
}

fn complete_pair(data: &DMatrix<f64>, i: usize, j: usize) -> (f64, f64) {
    let (xs, ys): (Vec<f64>, Vec<f64>) = (0..data.nrows())
        .map(|k| (data[(k, i)], data[(k, j)]))
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .unzip();

    let n = xs.len();
    if n < 2 {
        return (f64::NAN, f64::NAN);
    }

    let nf = n as f64;
    let mx = xs.iter().sum::<f64>() / nf;
    let my = ys.iter().sum::<f64>() / nf;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(&ys) {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let cov = sxy / (nf - 1.0);
    let cor = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    (cov, cor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_data() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 2.0, 4.0,
                2.0, 4.1, 3.0,
                3.0, 5.9, 2.0,
                4.0, 8.0, 1.5,
            ],
        )
    }

    #[test]
    fn test_covariance_matches_manual() {
        let data = create_test_data();
        let cov = covariance_matrix(&data);
        // var(1,2,3,4) = 5/3
        assert_relative_eq!(cov[(0, 0)], 5.0 / 3.0, epsilon = 1e-12);
        let vars = column_variances(&data);
        for j in 0..3 {
            assert_relative_eq!(cov[(j, j)], vars[j], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_covariance_symmetric() {
        let cov = covariance_matrix(&create_test_data());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(cov[(i, j)], cov[(j, i)]);
            }
        }
    }

    #[test]
    fn test_covariance_propagates_nan() {
        let mut data = create_test_data();
        data[(0, 1)] = f64::NAN;
        let cov = covariance_matrix(&data);
        assert!(cov[(1, 0)].is_nan());
        assert!(cov[(1, 1)].is_nan());
        assert!(!cov[(0, 2)].is_nan());
    }

    #[test]
    fn test_pairwise_matches_full_without_missing() {
        let data = create_test_data();
        let full = covariance_matrix(&data);
        let moments = pairwise_moments(&data);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(moments.cov[(i, j)], full[(i, j)], epsilon = 1e-12);
            }
            assert_relative_eq!(moments.cor[(i, i)], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pairwise_drops_rows_per_pair() {
        let mut data = create_test_data();
        data[(3, 1)] = f64::NAN;
        let moments = pairwise_moments(&data);

        // pair (0, 1) uses rows 0..3 only
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.1, 5.9];
        let (mx, my) = (2.0, 12.0 / 3.0);
        let expected: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - mx) * (y - my))
            .sum::<f64>()
            / 2.0;
        assert_relative_eq!(moments.cov[(0, 1)], expected, epsilon = 1e-12);

        // pair (0, 2) is unaffected
        let full = covariance_matrix(&create_test_data());
        assert_relative_eq!(moments.cov[(0, 2)], full[(0, 2)], epsilon = 1e-12);
        assert_relative_eq!(moments.cov[(0, 0)], 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pairwise_too_few_rows() {
        let data = DMatrix::from_row_slice(2, 2, &[1.0, f64::NAN, 2.0, 3.0]);
        let moments = pairwise_moments(&data);
        assert!(moments.cov[(0, 1)].is_nan());
        assert!(moments.cor[(0, 1)].is_nan());
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let data = DMatrix::from_row_slice(3, 2, &[1.0, 3.0, 2.0, 2.0, 3.0, 1.0]);
        let moments = pairwise_moments(&data);
        assert_relative_eq!(moments.cor[(0, 1)], -1.0, epsilon = 1e-12);
    }
}
