//! Status lines for the model productionization and backtest steps.

use crate::domain::BacktestSummary;
use crate::report::format::format_backtest;

/// Credit models reported as productionized.
pub const CREDIT_MODELS: [&str; 3] = [
    "Model A - Investment Grade",
    "Model B - High Yield",
    "Model C - Emerging Markets",
];

pub fn format_productionized() -> String {
    CREDIT_MODELS
        .iter()
        .map(|m| format!("Productionized: {m}\n"))
        .collect()
}

pub fn format_backtest_status(summary: &BacktestSummary) -> String {
    let mut out = format_backtest(summary);
    out.push_str("Backtesting Completed: Market Database Integrated with Credit Option Pricer\n");
    out
}
