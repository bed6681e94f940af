//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the computational units without any printing
//! - formatted/plotted by the presentation layer
//! - exported to JSON/CSV

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Half-open sampling range `[min, max)` for a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v < self.max
    }
}

/// One month of simulated traded-credit market risk data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRiskRow {
    /// Month-end date.
    pub date: NaiveDate,
    /// Investment grade bond spread (percentage points).
    pub investment_grade_spread: f64,
    /// High yield bond spread (percentage points).
    pub high_yield_spread: f64,
    pub market_volatility: f64,
}

/// Shape of the synthetic market data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataSpec {
    /// Any date inside the first month; rows are aligned to month ends.
    pub start: NaiveDate,
    pub periods: usize,
    pub investment_grade: ValueRange,
    pub high_yield: ValueRange,
    pub volatility: ValueRange,
}

impl Default for MarketDataSpec {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            periods: 12,
            investment_grade: ValueRange::new(1.5, 2.5),
            high_yield: ValueRange::new(5.0, 9.0),
            volatility: ValueRange::new(15.0, 25.0),
        }
    }
}

/// A bond position with its simulated P&L impact (both in millions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPosition {
    pub bond_id: u32,
    pub exposure_million: f64,
    pub pnl_impact_million: f64,
}

/// Shape of the synthetic P&L impact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSpec {
    pub first_bond_id: u32,
    pub positions: usize,
    pub exposure: ValueRange,
    pub pnl_impact: ValueRange,
}

impl Default for PortfolioSpec {
    fn default() -> Self {
        Self {
            first_bond_id: 101,
            positions: 10,
            exposure: ValueRange::new(10.0, 50.0),
            pnl_impact: ValueRange::new(-5.0, 15.0),
        }
    }
}

/// A (tenor, spread) control point of a spread curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondCurvePoint {
    /// Tenor in years.
    pub tenor: f64,
    /// Spread in percentage points.
    pub spread: f64,
}

/// Simulated high-yield spread curve used for the interpolation demo.
pub fn high_yield_curve() -> Vec<BondCurvePoint> {
    [(1.0, 5.2), (3.0, 4.8), (5.0, 4.1), (7.0, 3.5), (10.0, 3.0)]
        .into_iter()
        .map(|(tenor, spread)| BondCurvePoint { tenor, spread })
        .collect()
}

/// Boundary condition used to close the cubic spline system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryCondition {
    /// Third derivative continuous at the second and penultimate knots.
    #[default]
    NotAKnot,
    /// Zero second derivative at both end knots.
    Natural,
}

/// Interpolated curve sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub tenors: Vec<f64>,
    pub spreads: Vec<f64>,
}

impl CurveGrid {
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.tenors
            .iter()
            .copied()
            .zip(self.spreads.iter().copied())
            .collect()
    }
}

/// Output of the curve interpolation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveInterpolation {
    pub knots: Vec<BondCurvePoint>,
    pub boundary: BoundaryCondition,
    pub grid: CurveGrid,
}

/// Output of the inverse transform sampling unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleOutput {
    pub reference_size: usize,
    pub reference_min: f64,
    pub reference_max: f64,
    pub samples: Vec<f64>,
}

/// Fitted OLS model (with intercept).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub n_obs: usize,
}

/// Model-to-market price ratios of a simulated pricer backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub ratios: Vec<f64>,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Run-wide configuration (derived from CLI args).
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Seed of the market data generator (always deterministic).
    pub market_seed: u64,
    /// Base seed for every other unit; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub market: MarketDataSpec,
    pub reference_size: usize,
    pub resample_count: usize,
    pub histogram_bins: usize,
    pub observations: usize,
    pub noise_sd: f64,
    pub grid_points: usize,
    pub boundary: BoundaryCondition,
    pub portfolio: PortfolioSpec,
    pub backtest_runs: usize,
    /// Rows shown in table previews.
    pub head: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub plot_dir: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            market_seed: 42,
            seed: None,
            market: MarketDataSpec::default(),
            reference_size: 1000,
            resample_count: 500,
            histogram_bins: 30,
            observations: 100,
            noise_sd: 0.1,
            grid_points: 20,
            boundary: BoundaryCondition::NotAKnot,
            portfolio: PortfolioSpec::default(),
            backtest_runs: 10,
            head: 5,
            plot: true,
            plot_width: 60,
            plot_height: 15,
            plot_dir: None,
            export: None,
            export_curve: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve_is_strictly_increasing_in_tenor_and_decreasing_in_spread() {
        let curve = high_yield_curve();
        assert_eq!(curve.len(), 5);
        for w in curve.windows(2) {
            assert!(w[1].tenor > w[0].tenor);
            assert!(w[1].spread < w[0].spread);
        }
    }

    #[test]
    fn value_range_is_half_open() {
        let r = ValueRange::new(1.5, 2.5);
        assert!(r.contains(1.5));
        assert!(!r.contains(2.5));
        assert!(!ValueRange::new(2.0, 2.0).is_valid());
    }

    #[test]
    fn boundary_condition_serializes_kebab_case() {
        let json = serde_json::to_string(&BoundaryCondition::NotAKnot).unwrap();
        assert_eq!(json, "\"not-a-knot\"");
    }
}
