//! Assembly of pairwise statistics into a long-format table.

mod phi_df;

pub use phi_df::{lower_triangle_pairs, phi_df, run};
