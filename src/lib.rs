//! Composable Proportionality Analysis Library
//!
//! This library computes proportionality statistics between the features
//! (columns) of compositional data, where only the ratios between parts
//! carry information.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (LabeledMatrix, PairTable)
//! - **validate**: Domain checks for negative and missing values
//! - **zero**: Zero handling strategies (pseudocount)
//! - **normalize**: Closure and centered log-ratio transforms
//! - **stats**: Pairwise statistics (vlr, phi, phisym, rho, SMA)
//! - **pairs**: Assembly of all statistics into one table per feature pair
//! - **config**: YAML run configuration
//!
//! # Example
//!
//! ```no_run
//! use composable_propr::prelude::*;
//!
//! let x = LabeledMatrix::from_tsv("abundances.tsv").unwrap();
//!
//! let x_clr = clr(&x, true).unwrap();
//! let fit = sma(&x_clr);
//! let table = phi_df(&x);
//!
//! for pair in table.sorted_by(PairMetric::Phi).iter().take(10) {
//!     println!("{} ~ {}: phi = {:.3}", pair.row, pair.col, pair.phi);
//! }
//! # let _ = fit;
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod pairs;
pub mod stats;
pub mod validate;
pub mod zero;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::ProprConfig;
    pub use crate::data::{LabeledMatrix, PairMetric, PairStat, PairTable};
    pub use crate::error::{ProprError, Result};
    pub use crate::normalize::{clo, clr};
    pub use crate::pairs::{lower_triangle_pairs, phi_df, run};
    pub use crate::stats::{covariance, phi, phisym, rho, sma, vlr, SmaFit};
    pub use crate::validate::check_domain;
    pub use crate::zero::{add_pseudocount, replace_zeros};
}
