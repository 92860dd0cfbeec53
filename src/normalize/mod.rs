//! Transforms that take compositions out of the simplex.
//!
//! - **clo**: Closure, rows rescaled to sum to one
//! - **clr**: Centered log-ratio, rows logged and mean-centered

pub mod clo;
pub mod clr;

pub use clo::clo;
pub use clr::clr;
