//! Pair table of SMA, vlr and phi statistics.

use crate::config::ProprConfig;
use crate::data::{LabeledMatrix, PairStat, PairTable};
use crate::error::Result;
use crate::normalize::clr::clr_matrix;
use crate::stats::covariance::column_variances;
use crate::stats::phi::{phi_from_parts, phisym_matrix};
use crate::stats::sma::sma;
use crate::stats::vlr::vlr_matrix;
use crate::validate::check_if_requested;
use crate::zero::add_pseudocount;
use tracing::{debug, info};

/// Index pairs `(row, col)` of the strict lower triangle, column-major.
///
/// For 4 features: (1,0), (2,0), (3,0), (2,1), (3,1), (3,2).
pub fn lower_triangle_pairs(d: usize) -> Vec<(usize, usize)> {
    (0..d)
        .flat_map(|j| (j + 1..d).map(move |i| (i, j)))
        .collect()
}

/// Compute every pairwise statistic from raw data and unroll into one row per pair.
///
/// Steps: clr the input, fit SMA on the clr data, take vlr of the raw
/// data, scale vlr by the clr variance of the column feature to get phi,
/// and take phisym of the clr data. Each pair `(i, j)` with `i > j` is
/// reported with `row = names[i]` and `col = names[j]`, and every
/// statistic is read at `(i, j)`.
///
/// No validation is done. Fewer than two features give an empty table.
pub fn phi_df(x: &LabeledMatrix) -> PairTable {
    let d = x.ncols();
    debug!(nrows = x.nrows(), ncols = d, "building pair table");

    let x_clr = x.with_data(clr_matrix(x.matrix()));
    let fit = sma(&x_clr);
    let vlr = vlr_matrix(x.matrix());
    let clr_var = column_variances(x_clr.matrix());
    let phi = phi_from_parts(&vlr, &clr_var);
    let phisym = phisym_matrix(x_clr.matrix());

    let names = x.col_ids();
    let pairs: Vec<PairStat> = lower_triangle_pairs(d)
        .into_iter()
        .map(|(i, j)| PairStat {
            row: names[i].clone(),
            col: names[j].clone(),
            b: fit.b.get(i, j),
            p: fit.p.get(i, j),
            r2: fit.r2.get(i, j),
            vlr: vlr[(i, j)],
            phi: phi[(i, j)],
            phisym: phisym[(i, j)],
        })
        .collect();

    debug!(n_pairs = pairs.len(), "pair table built");
    PairTable::new(pairs)
}

/// Build the pair table under a [`ProprConfig`].
///
/// Runs the domain check on the raw input, then applies the pseudocount,
/// then [`phi_df`], then the phi filter.
pub fn run(x: &LabeledMatrix, config: &ProprConfig) -> Result<PairTable> {
    config.validate()?;
    check_if_requested(x, config.check)?;

    let prepared = match config.pseudocount {
        Some(pc) => add_pseudocount(x, pc)?,
        None => x.clone(),
    };

    let table = phi_df(&prepared);
    let table = match config.max_phi {
        Some(max_phi) => table.filter_phi(max_phi),
        None => table,
    };

    info!(
        features = x.ncols(),
        samples = x.nrows(),
        pairs = table.len(),
        "proportionality run complete"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProprError;
    use approx::assert_relative_eq;

    fn create_test_data() -> LabeledMatrix {
        LabeledMatrix::from_row_slice(
            6,
            4,
            &[
                10.0, 21.0, 5.0, 40.0,
                20.0, 39.0, 4.0, 22.0,
                30.0, 62.0, 6.0, 35.0,
                15.0, 29.0, 9.0, 18.0,
                25.0, 50.0, 3.0, 27.0,
                12.0, 26.0, 7.0, 31.0,
            ],
            (1..=6).map(|i| format!("S{}", i)).collect(),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_lower_triangle_order() {
        assert_eq!(
            lower_triangle_pairs(4),
            vec![(1, 0), (2, 0), (3, 0), (2, 1), (3, 1), (3, 2)]
        );
        assert!(lower_triangle_pairs(1).is_empty());
        assert!(lower_triangle_pairs(0).is_empty());
    }

    #[test]
    fn test_phi_df_row_count_and_labels() {
        let table = phi_df(&create_test_data());
        assert_eq!(table.len(), 6);
        let labels: Vec<(&str, &str)> = table
            .iter()
            .map(|p| (p.row.as_str(), p.col.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("b", "a"), ("c", "a"), ("d", "a"), ("c", "b"), ("d", "b"), ("d", "c")]
        );
    }

    #[test]
    fn test_phi_df_matches_matrices() {
        let x = create_test_data();
        let table = phi_df(&x);
        let x_clr = crate::normalize::clr(&x, false).unwrap();
        let fit = sma(&x_clr);
        let vlr = crate::stats::vlr(&x, false).unwrap();
        let phi = crate::stats::phi(&x);
        let phisym = crate::stats::phisym(&x_clr);

        let pair = table.get("d", "b").unwrap();
        assert_eq!(pair.b, fit.b.get(3, 1));
        assert_eq!(pair.p, fit.p.get(3, 1));
        assert_eq!(pair.r2, fit.r2.get(3, 1));
        assert_eq!(pair.vlr, vlr.get(3, 1));
        assert_eq!(pair.phi, phi.get(3, 1));
        assert_eq!(pair.phisym, phisym.get(3, 1));
    }

    #[test]
    fn test_phi_df_identities() {
        let table = phi_df(&create_test_data());
        for pair in &table {
            let b = pair.b;
            let r = pair.r2.sqrt();
            let num = 1.0 + b * b - 2.0 * b * r;
            let den = 1.0 + b * b + 2.0 * b * r;
            assert_relative_eq!(pair.phi, num, epsilon = 1e-6);
            assert_relative_eq!(pair.phisym, num / den, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_phi_df_single_feature_is_empty() {
        let x = LabeledMatrix::from_row_slice(
            3,
            1,
            &[1.0, 2.0, 3.0],
            vec!["S1".into(), "S2".into(), "S3".into()],
            vec!["a".into()],
        )
        .unwrap();
        assert!(phi_df(&x).is_empty());
    }

    #[test]
    fn test_run_default_matches_phi_df() {
        let x = create_test_data();
        let table = run(&x, &ProprConfig::default()).unwrap();
        assert_eq!(table.pairs, phi_df(&x).pairs);
    }

    #[test]
    fn test_run_check_rejects_negative() {
        let mut data = create_test_data().into_matrix();
        data[(2, 2)] = -1.0;
        let x = LabeledMatrix::with_default_labels(data);
        let config = ProprConfig {
            check: true,
            ..Default::default()
        };
        assert!(run(&x, &config).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_run_pseudocount_handles_zero() {
        let mut data = create_test_data().into_matrix();
        data[(0, 0)] = 0.0;
        let x = LabeledMatrix::with_default_labels(data);

        let raw = run(&x, &ProprConfig::default()).unwrap();
        assert!(!raw.pairs[0].vlr.is_finite());

        let config = ProprConfig {
            check: true,
            pseudocount: Some(1.0),
            max_phi: None,
        };
        let table = run(&x, &config).unwrap();
        assert!(table.iter().all(|p| p.vlr.is_finite()));
    }

    #[test]
    fn test_run_check_precedes_pseudocount() {
        // -0.3 + 0.5 would be positive; the raw value must still be rejected
        let mut data = create_test_data().into_matrix();
        data[(1, 0)] = -0.3;
        let x = LabeledMatrix::with_default_labels(data);
        let config = ProprConfig {
            check: true,
            pseudocount: Some(0.5),
            max_phi: None,
        };
        let err = run(&x, &config).unwrap_err();
        assert!(err.is_domain_error());
        assert!(matches!(err, ProprError::NegativeValue { row: 1, col: 0, .. }));
    }

    #[test]
    fn test_run_max_phi_filter() {
        let x = create_test_data();
        let config = ProprConfig {
            max_phi: Some(0.5),
            ..Default::default()
        };
        let table = run(&x, &config).unwrap();
        assert!(table.iter().all(|p| p.phi <= 0.5));
        assert!(table.get("b", "a").is_some());
    }
}
