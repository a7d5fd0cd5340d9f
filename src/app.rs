//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - reads points and runs the fit / comparison
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, FitArgs, InputArgs, PlotArgs, SampleArgs};
use crate::data::{SampleConfig, generate_sample};
use crate::domain::{FitConfig, PointSource};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `curvefit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is normal; only explicit CLI/env settings matter then.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Compare(args) => handle_compare(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // Ignore a second initialisation (e.g. when embedded in tests).
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.fit, &run.quality, config.precision)
    );
    println!(
        "{}",
        crate::report::format_residual_table(&run.residuals, config.precision)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.residuals,
            &run.fit,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, run.fit.curve_type, &run.residuals)?;
    }
    if let Some(path) = &config.export_curve {
        let (x_min, x_max) = run.ingest.points.x_range().unwrap_or((0.0, 1.0));
        let curve = crate::io::curve::curve_file(&run.fit, &run.quality, x_min, x_max);
        crate::io::curve::write_curve_json(path, &curve)?;
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let source = point_source(&args.input);
    let (ingest, selection) = pipeline::run_compare(&source, &args.curves)?;

    println!(
        "Source: {} | points: n={} (skipped {})\n",
        ingest.source_label,
        ingest.points.len(),
        ingest.skipped()
    );
    println!("{}", crate::report::format_comparison(&selection, args.precision));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        coefficients: args.coefficients,
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let points = generate_sample(&config)?;
    println!("{points}");
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve_file)?;

    println!("{}", curve.equation);
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        source: point_source(&args.input),
        curve: args.curve.clone(),
        precision: args.precision,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

/// Resolve the input flags to a single source.
///
/// Rules:
/// - `--points TEXT`  -> inline text
/// - `--file -`       -> stdin
/// - `--file PATH`    -> text file
/// - `--csv PATH`     -> CSV file
/// - nothing          -> built-in starter points
fn point_source(input: &InputArgs) -> PointSource {
    if let Some(raw) = &input.points {
        return PointSource::Inline(raw.clone());
    }
    if let Some(path) = &input.file {
        if path.as_os_str() == "-" {
            return PointSource::Stdin;
        }
        return PointSource::File(path.clone());
    }
    if let Some(path) = &input.csv {
        return PointSource::Csv(path.clone());
    }
    log::info!("no points supplied; using the built-in starter points");
    PointSource::Starter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn fit_args(argv: &[&str]) -> FitArgs {
        let mut full = vec!["curvefit", "fit"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Fit(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn source_resolution() {
        assert_eq!(point_source(&fit_args(&[]).input), PointSource::Starter);
        assert_eq!(
            point_source(&fit_args(&["--points", "1,2"]).input),
            PointSource::Inline("1,2".to_string())
        );
        assert_eq!(point_source(&fit_args(&["--file", "-"]).input), PointSource::Stdin);
        assert_eq!(
            point_source(&fit_args(&["--csv", "pts.csv"]).input),
            PointSource::Csv("pts.csv".into())
        );
    }

    #[test]
    fn config_from_args() {
        let config = fit_config_from_args(&fit_args(&[
            "--curve",
            "quadratic",
            "--no-plot",
            "--precision",
            "3",
            "--export",
            "out.csv",
        ]));
        assert_eq!(config.curve, "quadratic");
        assert!(!config.plot);
        assert_eq!(config.precision, Some(3));
        assert_eq!(config.export_results, Some("out.csv".into()));
        assert_eq!(config.export_curve, None);
    }
}
