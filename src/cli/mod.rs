//! Command-line parsing for the credit risk analytics demo.
//!
//! Argument parsing and command dispatch stay separate from the generators and
//! math; `app` maps the parsed args into an `AnalyticsConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::BoundaryCondition;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "crisk", version, about = "Credit Risk Analytics & Bond Pricing demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every unit in order (the default when no subcommand is given).
    Run(RunArgs),
    /// Generate and preview the seeded market risk table.
    Market(RunArgs),
    /// Resample standard-normal residuals through their empirical quantiles.
    Resample(RunArgs),
    /// Fit the three-factor regression and report R².
    Regress(RunArgs),
    /// Interpolate the high-yield spread curve with a cubic spline.
    Spline(RunArgs),
    /// Generate and preview the P&L impact table.
    Pnl(RunArgs),
    /// Print the model productionization and backtest status.
    Status(RunArgs),
}

/// Options shared by every subcommand; options a unit does not use are ignored.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Seed of the market data generator.
    #[arg(long, default_value_t = 42)]
    pub market_seed: u64,

    /// Base seed for the other units (omit for fresh randomness on each run).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of resampled residuals.
    #[arg(short = 'n', long, default_value_t = 500)]
    pub samples: usize,

    /// Size of the reference residual sample.
    #[arg(long, default_value_t = 1000)]
    pub reference_size: usize,

    /// Histogram bins for the resampled residuals.
    #[arg(long, default_value_t = 30)]
    pub bins: usize,

    /// Observations in the regression dataset.
    #[arg(long, default_value_t = 100)]
    pub observations: usize,

    /// Standard deviation of the regression noise.
    #[arg(long, default_value_t = 0.1)]
    pub noise_sd: f64,

    /// Points on the interpolated curve grid.
    #[arg(long, default_value_t = 20)]
    pub grid_points: usize,

    /// Spline boundary condition.
    #[arg(long, value_enum, default_value_t = BoundaryCondition::NotAKnot)]
    pub boundary: BoundaryCondition,

    /// Rows shown in table previews.
    #[arg(long, default_value_t = 5)]
    pub head: usize,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Also write the plots as SVG files into this directory.
    #[arg(long, value_name = "DIR")]
    pub plot_dir: Option<PathBuf>,

    /// Export all computed outputs to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export the interpolated curve grid to CSV.
    #[arg(long = "export-curve", value_name = "CSV")]
    pub export_curve: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_args_defaults() {
        let cli = Cli::parse_from(["crisk", "run"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.market_seed, 42);
        assert_eq!(args.seed, None);
        assert_eq!(args.samples, 500);
        assert_eq!(args.boundary, BoundaryCondition::NotAKnot);
        assert!(!args.no_plot);
    }

    #[test]
    fn boundary_accepts_kebab_case() {
        let cli = Cli::parse_from(["crisk", "spline", "--boundary", "natural", "--grid-points", "50"]);
        let Command::Spline(args) = cli.command else {
            panic!("expected spline");
        };
        assert_eq!(args.boundary, BoundaryCondition::Natural);
        assert_eq!(args.grid_points, 50);
    }
}
