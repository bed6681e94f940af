//! The analytics pipeline, shared by every CLI subcommand.
//!
//! Each step builds its own random generator and returns plain data:
//! market data -> residual resampling -> regression -> spline -> P&L -> backtest
//!
//! Printing, plotting and exporting happen in `app` on the returned `RunOutput`.

use serde::Serialize;
use tracing::{debug, info};

use crate::data::{
    Unit, generate_market_data, generate_positions, generate_regression_dataset, resample_residuals,
    simulate_backtest, unit_rng,
};
use crate::domain::{
    AnalyticsConfig, BacktestSummary, BondCurvePoint, BoundaryCondition, CurveGrid, CurveInterpolation,
    MarketRiskRow, PortfolioPosition, RegressionFit, ResampleOutput, high_yield_curve,
};
use crate::error::AppError;
use crate::math::{CubicSpline, fit_ols};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// One unit of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Market,
    Resample,
    Regress,
    Spline,
    Pnl,
    Status,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Market,
        Step::Resample,
        Step::Regress,
        Step::Spline,
        Step::Pnl,
        Step::Status,
    ];
}

/// All computed outputs of a run; steps that did not run stay `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<Vec<MarketRiskRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resample: Option<ResampleOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<RegressionFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<CurveInterpolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<PortfolioPosition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backtest: Option<BacktestSummary>,
}

/// Execute `steps` in order and collect their outputs.
pub fn run_steps(config: &AnalyticsConfig, steps: &[Step]) -> Result<RunOutput, AppError> {
    let mut out = RunOutput::default();
    for step in steps {
        match step {
            Step::Market => out.market = Some(run_market(config)?),
            Step::Resample => out.resample = Some(run_resample(config)?),
            Step::Regress => out.regression = Some(run_regression(config)?),
            Step::Spline => out.curve = Some(run_spline(config)?),
            Step::Pnl => out.positions = Some(run_portfolio(config)?),
            Step::Status => out.backtest = Some(run_backtest(config)?),
        }
    }
    Ok(out)
}

pub fn run_market(config: &AnalyticsConfig) -> Result<Vec<MarketRiskRow>, AppError> {
    debug!(seed = config.market_seed, periods = config.market.periods, "generating market data");
    let mut rng = StdRng::seed_from_u64(config.market_seed);
    let rows = generate_market_data(&mut rng, &config.market)?;
    info!(rows = rows.len(), "market data generated");
    Ok(rows)
}

pub fn run_resample(config: &AnalyticsConfig) -> Result<ResampleOutput, AppError> {
    let mut rng = unit_rng(config.seed, Unit::Residuals);
    let out = resample_residuals(&mut rng, config.reference_size, config.resample_count)?;
    info!(
        reference = out.reference_size,
        samples = out.samples.len(),
        "residuals resampled"
    );
    Ok(out)
}

pub fn run_regression(config: &AnalyticsConfig) -> Result<RegressionFit, AppError> {
    let mut rng = unit_rng(config.seed, Unit::Regression);
    let ds = generate_regression_dataset(&mut rng, config.observations, config.noise_sd)?;
    let fit = fit_ols(&ds.x, &ds.y)?;
    info!(r_squared = fit.r_squared, n = fit.n_obs, "regression fitted");
    Ok(fit)
}

pub fn run_spline(config: &AnalyticsConfig) -> Result<CurveInterpolation, AppError> {
    let curve = interpolate_curve(&high_yield_curve(), config.boundary, config.grid_points)?;
    info!(points = curve.grid.tenors.len(), boundary = ?curve.boundary, "spread curve interpolated");
    Ok(curve)
}

pub fn run_portfolio(config: &AnalyticsConfig) -> Result<Vec<PortfolioPosition>, AppError> {
    let mut rng = unit_rng(config.seed, Unit::Portfolio);
    let positions = generate_positions(&mut rng, &config.portfolio)?;
    info!(positions = positions.len(), "P&L impact table generated");
    Ok(positions)
}

pub fn run_backtest(config: &AnalyticsConfig) -> Result<BacktestSummary, AppError> {
    let mut rng = unit_rng(config.seed, Unit::Backtest);
    let summary = simulate_backtest(&mut rng, config.backtest_runs)?;
    info!(runs = summary.ratios.len(), mean = summary.mean, "backtest simulated");
    Ok(summary)
}

/// Fit a spline through `knots` (in the given order) and sample it on `grid_points` points.
pub fn interpolate_curve(
    knots: &[BondCurvePoint],
    boundary: BoundaryCondition,
    grid_points: usize,
) -> Result<CurveInterpolation, AppError> {
    let spline = CubicSpline::new(
        knots.iter().map(|k| k.tenor).collect(),
        knots.iter().map(|k| k.spread).collect(),
        boundary,
    )?;
    let (tenors, spreads) = spline.evaluate_grid(grid_points);

    Ok(CurveInterpolation {
        knots: spline
            .knots()
            .map(|(tenor, spread)| BondCurvePoint { tenor, spread })
            .collect(),
        boundary: spline.boundary(),
        grid: CurveGrid { tenors, spreads },
    })
}
