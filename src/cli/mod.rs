//! Command-line parsing for the polynomial curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "curvefit", version, about = "Least-squares polynomial curve fitter (degree 1-3)")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one curve type, print the equation and fitted values, optionally plot/export.
    Fit(FitArgs),
    /// Fit every degree and report which one the data supports best (BIC).
    Compare(CompareArgs),
    /// Generate noisy `x,y` points from a known polynomial.
    Sample(SampleArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Where to read points from. With none of these, the built-in starter points are used.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Points as whitespace-separated `x,y` tokens, e.g. "1,2 3,7 5,6".
    #[arg(short, long, conflicts_with_all = ["file", "csv"])]
    pub points: Option<String>,

    /// File of whitespace-separated `x,y` tokens (`-` reads stdin).
    #[arg(short, long, value_name = "PATH", conflicts_with = "csv")]
    pub file: Option<PathBuf>,

    /// CSV file with `x` and `y` header columns.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

/// Options for fitting a single curve.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Curve type: linear, quadratic or cubic.
    #[arg(short, long, env = "CURVEFIT_CURVE", default_value = "linear")]
    pub curve: String,

    /// Decimal places for printed numbers (full precision when omitted).
    #[arg(long, env = "CURVEFIT_PRECISION")]
    pub precision: Option<usize>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, env = "CURVEFIT_PLOT_WIDTH", default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, env = "CURVEFIT_PLOT_HEIGHT", default_value_t = 20)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export curve (coefficients + diagnostics + fitted grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,
}

/// Options for comparing degrees.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Curve types to compare (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "linear,quadratic,cubic")]
    pub curves: Vec<String>,

    /// Decimal places for printed numbers (full precision when omitted).
    #[arg(long, env = "CURVEFIT_PRECISION")]
    pub precision: Option<usize>,
}

/// Options for synthetic point generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Polynomial coefficients, constant term first (e.g. `1,-2,0.5`).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub coefficients: Vec<f64>,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Lower bound of the x range.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the x range.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 1.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `curvefit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve_file: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_defaults() {
        let cli = Cli::try_parse_from(["curvefit", "fit", "--points", "1,2 3,4"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.input.points.as_deref(), Some("1,2 3,4"));
        assert_eq!(args.width, 72);
        assert!(!args.no_plot);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn points_and_file_conflict() {
        assert!(Cli::try_parse_from(["curvefit", "fit", "-p", "1,2", "-f", "pts.txt"]).is_err());
    }

    #[test]
    fn sample_accepts_negative_coefficients() {
        let cli = Cli::try_parse_from([
            "curvefit",
            "-vv",
            "sample",
            "--coefficients",
            "-1,2.5,-0.5",
            "--x-min",
            "-3",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.coefficients, vec![-1.0, 2.5, -0.5]);
        assert_eq!(args.x_min, -3.0);
    }

    #[test]
    fn compare_splits_curve_list() {
        let cli = Cli::try_parse_from(["curvefit", "compare", "--curves", "linear,cubic"]).unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.curves, vec!["linear", "cubic"]);
    }
}
