//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the requested pipeline steps
//! - prints reports and plots
//! - writes optional exports

use std::io::Write;

use clap::Parser;
use tracing::{debug, info, warn};

use crate::cli::{Command, RunArgs};
use crate::domain::AnalyticsConfig;
use crate::error::AppError;
use crate::plot::{AsciiPlotter, Histogram, PlotBackend, SvgPlotter};

pub mod pipeline;

use pipeline::{RunOutput, Step};

/// Title printed above the market data preview.
pub const PROJECT_NAME: &str = "Credit Risk Analytics & Bond Pricing";

/// Entry point for the `crisk` binary.
pub fn run() -> Result<(), AppError> {
    // `crisk` and `crisk --seed 7` behave like `crisk run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let (args, steps): (RunArgs, Vec<Step>) = match cli.command {
        Command::Run(args) => (args, Step::ALL.to_vec()),
        Command::Market(args) => (args, vec![Step::Market]),
        Command::Resample(args) => (args, vec![Step::Resample]),
        Command::Regress(args) => (args, vec![Step::Regress]),
        Command::Spline(args) => (args, vec![Step::Spline]),
        Command::Pnl(args) => (args, vec![Step::Pnl]),
        Command::Status(args) => (args, vec![Step::Status]),
    };

    let config = config_from_args(&args);
    debug!(?config, "configuration");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&config, &steps, &mut out)?;
    Ok(())
}

/// Run `steps`, write the report to `out`, then draw plots and write exports.
pub fn execute(config: &AnalyticsConfig, steps: &[Step], out: &mut dyn Write) -> Result<RunOutput, AppError> {
    if config.export_curve.is_some() && !steps.contains(&Step::Spline) {
        return Err(AppError::new(2, "--export-curve needs the spline step (use `run` or `spline`)."));
    }

    let output = pipeline::run_steps(config, steps)?;

    let mut svg = match &config.plot_dir {
        Some(dir) => Some(SvgPlotter::new(dir)?),
        None => None,
    };

    for step in steps {
        let text = render_step(config, &output, *step);
        write!(out, "\n{text}").map_err(write_err)?;
        draw_step(config, &output, *step, out, svg.as_mut())?;
    }

    if let Some(svg) = &svg {
        for path in svg.written() {
            info!(path = %path.display(), "SVG plot written");
        }
    }

    if let Some(path) = &config.export {
        crate::io::write_json(path, &output)?;
        info!(path = %path.display(), "run exported");
    }
    if let (Some(path), Some(curve)) = (&config.export_curve, &output.curve) {
        crate::io::write_curve_csv(path, &curve.grid)?;
        info!(path = %path.display(), "curve grid exported");
    }

    Ok(output)
}

fn render_step(config: &AnalyticsConfig, output: &RunOutput, step: Step) -> String {
    use crate::report;

    match step {
        Step::Market => output
            .market
            .as_deref()
            .map(|rows| report::format_market_preview(PROJECT_NAME, rows, config.head)),
        Step::Resample => output.resample.as_ref().map(report::format_resample_summary),
        Step::Regress => output.regression.as_ref().map(report::format_regression),
        Step::Spline => output.curve.as_ref().map(report::format_curve),
        Step::Pnl => output
            .positions
            .as_deref()
            .map(|p| report::format_positions_preview(p, config.head)),
        Step::Status => output
            .backtest
            .as_ref()
            .map(|b| format!("{}\n{}", report::format_productionized(), report::format_backtest_status(b))),
    }
    .unwrap_or_default()
}

/// Draw the plot belonging to `step`, if any.
///
/// A failing backend is logged and skipped; only terminal write errors abort.
fn draw_step(
    config: &AnalyticsConfig,
    output: &RunOutput,
    step: Step,
    out: &mut dyn Write,
    svg: Option<&mut SvgPlotter>,
) -> Result<(), AppError> {
    let draw: Box<dyn Fn(&mut dyn PlotBackend) -> Result<(), AppError>> = match step {
        Step::Resample => {
            let Some(resample) = &output.resample else {
                return Ok(());
            };
            let Some(hist) = Histogram::from_values(&resample.samples, config.histogram_bins) else {
                debug!("no resampled values to plot");
                return Ok(());
            };
            Box::new(move |backend: &mut dyn PlotBackend| {
                backend.histogram("residuals", "Inverse Transform Sampling for Residuals", &hist)
            })
        }
        Step::Spline => {
            let Some(curve) = &output.curve else {
                return Ok(());
            };
            let knots: Vec<(f64, f64)> = curve.knots.iter().map(|k| (k.tenor, k.spread)).collect();
            let grid = curve.grid.points();
            Box::new(move |backend: &mut dyn PlotBackend| {
                backend.curve_overlay("spread_curve", "Bond Spread Curve (Cubic Spline)", &knots, &grid)
            })
        }
        _ => return Ok(()),
    };

    if config.plot {
        let mut ascii = AsciiPlotter::new(&mut *out, config.plot_width, config.plot_height);
        draw(&mut ascii)?;
    }
    if let Some(svg) = svg {
        let backend: &mut dyn PlotBackend = svg;
        if let Err(err) = draw(backend) {
            warn!(%err, "SVG plot skipped");
        }
    }
    Ok(())
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write report: {e}"))
}

pub fn config_from_args(args: &RunArgs) -> AnalyticsConfig {
    AnalyticsConfig {
        market_seed: args.market_seed,
        seed: args.seed,
        reference_size: args.reference_size,
        resample_count: args.samples,
        histogram_bins: args.bins,
        observations: args.observations,
        noise_sd: args.noise_sd,
        grid_points: args.grid_points,
        boundary: args.boundary,
        head: args.head,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        plot_dir: args.plot_dir.clone(),
        export: args.export.clone(),
        export_curve: args.export_curve.clone(),
        ..AnalyticsConfig::default()
    }
}

/// Rewrite argv so `crisk` defaults to `crisk run`.
///
/// Rules:
/// - `crisk`                      -> `crisk run`
/// - `crisk --seed 7 ...`         -> `crisk run --seed 7 ...`
/// - `crisk --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crisk-app-{}-{name}", std::process::id()))
    }

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        assert_eq!(rewrite_args(args(&["crisk"])), args(&["crisk", "run"]));
        assert_eq!(
            rewrite_args(args(&["crisk", "--seed", "7"])),
            args(&["crisk", "run", "--seed", "7"])
        );
        assert_eq!(rewrite_args(args(&["crisk", "--help"])), args(&["crisk", "--help"]));
        assert_eq!(rewrite_args(args(&["crisk", "spline"])), args(&["crisk", "spline"]));
    }

    #[test]
    fn default_args_map_to_default_config() {
        let cli = crate::cli::Cli::parse_from(["crisk", "run"]);
        let Command::Run(run_args) = cli.command else {
            panic!("expected run");
        };
        let config = config_from_args(&run_args);
        let default = AnalyticsConfig::default();
        assert_eq!(config.market_seed, default.market_seed);
        assert_eq!(config.resample_count, default.resample_count);
        assert_eq!(config.grid_points, default.grid_points);
        assert_eq!(config.plot_width, default.plot_width);
        assert!(config.plot);
    }

    #[test]
    fn full_run_prints_every_section() {
        let config = AnalyticsConfig {
            seed: Some(11),
            ..AnalyticsConfig::default()
        };
        let mut buf = Vec::new();
        execute(&config, &Step::ALL, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Credit Risk Analytics & Bond Pricing: Market Risk Data"));
        assert!(text.contains("2023-01-31"));
        assert!(text.contains("Inverse Transform Sampling for Residuals\nHistogram: n=500"));
        assert!(text.contains("Multivariate Regression R²"));
        assert!(text.contains("Bond Spread Curve (Cubic Spline)\nPlot: tenor="));
        assert!(text.contains("P&L Impact Testing Data:"));
        assert!(text.contains("Productionized: Model C - Emerging Markets"));
        assert!(text.contains("Backtesting Completed"));
    }

    #[test]
    fn no_plot_suppresses_terminal_plots() {
        let config = AnalyticsConfig {
            seed: Some(11),
            plot: false,
            ..AnalyticsConfig::default()
        };
        let mut buf = Vec::new();
        execute(&config, &[Step::Resample, Step::Spline], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("Histogram:"));
        assert!(!text.contains("Plot: tenor="));
        assert!(text.contains("Spread Curve Interpolation"));
    }

    #[test]
    fn plot_dir_receives_svg_files() {
        let dir = temp_dir("svg");
        let config = AnalyticsConfig {
            seed: Some(3),
            plot: false,
            plot_dir: Some(dir.clone()),
            ..AnalyticsConfig::default()
        };
        let mut buf = Vec::new();
        execute(&config, &[Step::Resample, Step::Spline], &mut buf).unwrap();
        assert!(dir.join("residuals.svg").exists());
        assert!(dir.join("spread_curve.svg").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn curve_export_without_spline_step_is_rejected() {
        let config = AnalyticsConfig {
            export_curve: Some(temp_dir("curve.csv")),
            ..AnalyticsConfig::default()
        };
        let err = execute(&config, &[Step::Market], &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
