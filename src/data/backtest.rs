//! Simulated backtest of a credit option pricer against market prices.

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::domain::BacktestSummary;
use crate::error::AppError;

const RATIO_MIN: f64 = 0.8;
const RATIO_MAX: f64 = 1.2;

/// Draw `runs` model/market price ratios and summarise them.
pub fn simulate_backtest<R: Rng + ?Sized>(rng: &mut R, runs: usize) -> Result<BacktestSummary, AppError> {
    if runs == 0 {
        return Err(AppError::new(2, "Backtest needs at least one run."));
    }

    let dist = Uniform::new(RATIO_MIN, RATIO_MAX);
    let ratios: Vec<f64> = (0..runs).map(|_| dist.sample(rng)).collect();

    let mean = ratios.iter().sum::<f64>() / runs as f64;
    let min = ratios.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(BacktestSummary { ratios, mean, min, max })
}
