//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the generators and math stay print-free and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{
    BacktestSummary, CurveInterpolation, MarketRiskRow, PortfolioPosition, RegressionFit, ResampleOutput,
};

/// First `head` rows of the market data table.
pub fn format_market_preview(project: &str, rows: &[MarketRiskRow], head: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{project}: Market Risk Data\n"));
    push_line(
        &mut out,
        format!("{:<12} {:>12} {:>12} {:>12}", "date", "ig_spread", "hy_spread", "volatility"),
    );
    push_line(&mut out, format!("{:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", ""));

    for r in rows.iter().take(head) {
        push_line(
            &mut out,
            format!(
                "{:<12} {:>12.6} {:>12.6} {:>12.6}",
                r.date.to_string(),
                r.investment_grade_spread,
                r.high_yield_spread,
                r.market_volatility
            ),
        );
    }
    push_more(&mut out, rows.len(), head);
    out
}

/// First `head` rows of the P&L impact table.
pub fn format_positions_preview(positions: &[PortfolioPosition], head: usize) -> String {
    let mut out = String::new();
    out.push_str("P&L Impact Testing Data:\n");
    push_line(
        &mut out,
        format!("{:<8} {:>16} {:>18}", "bond_id", "exposure_mm", "pnl_impact_mm"),
    );
    push_line(&mut out, format!("{:-<8} {:-<16} {:-<18}", "", "", ""));

    for p in positions.iter().take(head) {
        push_line(
            &mut out,
            format!(
                "{:<8} {:>16.6} {:>18.6}",
                p.bond_id, p.exposure_million, p.pnl_impact_million
            ),
        );
    }
    push_more(&mut out, positions.len(), head);
    out
}

pub fn format_regression(fit: &RegressionFit) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Multivariate Regression R²: {:.3} (n={})\n",
        fit.r_squared, fit.n_obs
    ));
    out.push_str(&format!("- intercept   : {:.6}\n", fit.intercept));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&fit.coefficients)));
    out
}

pub fn format_resample_summary(resample: &ResampleOutput) -> String {
    let n = resample.samples.len();
    let mut out = format!(
        "Inverse Transform Sampling: {n} draws from {} reference residuals in [{:.3}, {:.3}]\n",
        resample.reference_size, resample.reference_min, resample.reference_max
    );
    if n > 0 {
        let mean = resample.samples.iter().sum::<f64>() / n as f64;
        let var = resample.samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        out.push_str(&format!("- mean={mean:.4} sd={:.4}\n", var.sqrt()));
    }
    out
}

/// Interpolated grid as a two-column table.
pub fn format_curve(curve: &CurveInterpolation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Spread Curve Interpolation ({} knots, {:?} boundary, {} points):\n",
        curve.knots.len(),
        curve.boundary,
        curve.grid.tenors.len()
    ));
    push_line(&mut out, format!("{:>10} {:>10}", "tenor", "spread"));
    push_line(&mut out, format!("{:-<10} {:-<10}", "", ""));
    for (t, s) in curve.grid.points() {
        push_line(&mut out, format!("{t:>10.4} {s:>10.4}"));
    }
    out
}

pub fn format_backtest(summary: &BacktestSummary) -> String {
    format!(
        "Backtest price ratios (model/market): n={} mean={:.4} min={:.4} max={:.4}\n",
        summary.ratios.len(),
        summary.mean,
        summary.min,
        summary.max
    )
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_more(out: &mut String, total: usize, head: usize) {
    if total > head {
        out.push_str(&format!("... ({} more rows)\n", total - head));
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
