//! Standardized major axis (SMA) fit for every feature pair.
//!
//! Follows Warton et al. (2006), "Bivariate line-fitting methods for
//! allometry". Biological Reviews, 81, 259-291.

use crate::data::LabeledMatrix;
use crate::stats::covariance::pairwise_moments;
use nalgebra::DMatrix;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::debug;

/// SMA results for all feature pairs, each D × D and labeled by feature.
#[derive(Debug, Clone)]
pub struct SmaFit {
    /// Slope of feature `i` (vertical axis) on feature `j`.
    pub b: LabeledMatrix,
    /// P-value of the test that the slope equals one.
    pub p: LabeledMatrix,
    /// Squared correlation.
    pub r2: LabeledMatrix,
    /// Residual degrees of freedom (N - 2).
    pub df: f64,
}

/// Fit the standardized major axis between every pair of columns.
///
/// Input must already be in clr space. Moments use pairwise-complete
/// observations.
///
/// # Formula
/// b(i, j) = sign(cor(i, j)) * sd_i / sd_j
///
/// r_rf^2 = (var_i - var_j)^2 / ((var_i + var_j)^2 - 4 cov(i, j)^2),
/// with the diagonal set to 0
///
/// F = r_rf^2 / (1 - r_rf^2) * (N - 2), p = 1 - F_cdf(F; 1, N - 2)
///
/// r2(i, j) = cor(i, j)^2
///
/// A perfectly proportional pair divides by zero in r_rf^2 and its p-value
/// is NaN or 0; nothing is guarded besides the diagonal.
pub fn sma(x_clr: &LabeledMatrix) -> SmaFit {
    let data = x_clr.matrix();
    let d = data.ncols();
    let df = data.nrows() as f64 - 2.0;
    debug!(nrows = data.nrows(), ncols = d, df, "fitting sma");

    let moments = pairwise_moments(data);
    let (cov, cor) = (&moments.cov, &moments.cor);
    let var: Vec<f64> = (0..d).map(|i| cov[(i, i)]).collect();
    let sd: Vec<f64> = var.iter().map(|v| v.sqrt()).collect();

    let b = DMatrix::from_fn(d, d, |i, j| sign(cor[(i, j)]) * (sd[i] / sd[j]));

    let f_dist = FisherSnedecor::new(1.0, df).ok();
    let p = DMatrix::from_fn(d, d, |i, j| {
        let r_rf2 = if i == j {
            0.0
        } else {
            (var[i] - var[j]).powi(2) / ((var[i] + var[j]).powi(2) - 4.0 * cov[(i, j)].powi(2))
        };
        let f = r_rf2 / (1.0 - r_rf2) * df;
        upper_tail(f_dist.as_ref(), f)
    });

    let r2 = cor.map(|r| r * r);

    let ids = x_clr.col_ids();
    SmaFit {
        b: LabeledMatrix::square(b, ids),
        p: LabeledMatrix::square(p, ids),
        r2: LabeledMatrix::square(r2, ids),
        df,
    }
}

/// Sign with zero mapped to zero and NaN kept.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        value
    }
}

/// 1 - CDF of F(1, df) at `f`; NaN when the distribution or statistic is undefined.
fn upper_tail(dist: Option<&FisherSnedecor>, f: f64) -> f64 {
    match dist {
        Some(dist) if !f.is_nan() => {
            if f.is_infinite() {
                if f > 0.0 {
                    0.0
                } else {
                    1.0
                }
            } else {
                1.0 - dist.cdf(f)
            }
        }
        _ => f64::NAN,
    }
}
