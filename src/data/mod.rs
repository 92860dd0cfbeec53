//! Data structures for proportionality analysis.

mod labeled_matrix;
mod pair_table;

pub use labeled_matrix::LabeledMatrix;
pub use pair_table::{PairMetric, PairStat, PairTable};
