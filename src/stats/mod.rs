//! Pairwise statistics between features.
//!
//! - **covariance**: column covariance and pairwise-complete moments
//! - **vlr**: variance of log-ratios
//! - **phi**: phisym, phi and rho
//! - **sma**: standardized major axis slope, p-value and r2

pub mod covariance;
pub mod phi;
pub mod sma;
pub mod vlr;

pub use covariance::covariance;
pub use phi::{phi, phisym, rho};
pub use sma::{sma, SmaFit};
pub use vlr::vlr;
