//! Synthetic data generators.
//!
//! Each generator takes an explicit `&mut impl Rng`; `seed` builds one
//! generator per unit.

pub mod backtest;
pub mod market;
pub mod portfolio;
pub mod regression;
pub mod residuals;
pub mod seed;

pub use backtest::simulate_backtest;
pub use market::generate_market_data;
pub use portfolio::generate_positions;
pub use regression::{RegressionDataset, TRUE_COEFFICIENTS, generate_regression_dataset};
pub use residuals::resample_residuals;
pub use seed::{Unit, unit_rng};
