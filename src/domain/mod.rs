//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - generated records (`MarketRiskRow`, `PortfolioPosition`, `BondCurvePoint`)
//! - per-unit outputs (`ResampleOutput`, `RegressionFit`, `CurveInterpolation`, ...)
//! - run configuration (`AnalyticsConfig`)

pub mod types;

pub use types::*;
