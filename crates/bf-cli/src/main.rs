//! binfit CLI

use anyhow::Result;
use bf_chi2::{Chi2Calculator, ChiSquareSummary};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

mod document;

#[derive(Parser)]
#[command(name = "binfit")]
#[command(about = "binfit - bin-integrated residuals, pulls and chi-square")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Residuals (observed - bin-averaged curve) per bin
    Resid {
        /// Input plot document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Histogram name. Defaults to the first histogram in the document.
        #[arg(long)]
        hist: Option<String>,

        /// Curve name. Defaults to the first curve in the document.
        #[arg(long)]
        curve: Option<String>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pulls (residuals divided by the bin uncertainty) per bin
    Pull {
        /// Input plot document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Histogram name. Defaults to the first histogram in the document.
        #[arg(long)]
        hist: Option<String>,

        /// Curve name. Defaults to the first curve in the document.
        #[arg(long)]
        curve: Option<String>,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Chi-square of a histogram against a curve
    Chi2 {
        /// Input plot document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Histogram name. Defaults to the first histogram in the document.
        #[arg(long)]
        hist: Option<String>,

        /// Curve name. Defaults to the first curve in the document.
        #[arg(long)]
        curve: Option<String>,

        /// Number of fitted parameters (only used for ndf / reduced chi-square)
        #[arg(long, default_value = "0")]
        n_fit_params: usize,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resid { input, hist, curve, output } => {
            cmd_resid(&input, hist.as_deref(), curve.as_deref(), false, output.as_ref())
        }
        Commands::Pull { input, hist, curve, output } => {
            cmd_resid(&input, hist.as_deref(), curve.as_deref(), true, output.as_ref())
        }
        Commands::Chi2 { input, hist, curve, n_fit_params, output } => {
            cmd_chi2(&input, hist.as_deref(), curve.as_deref(), n_fit_params, output.as_ref())
        }
        Commands::Version => {
            println!("binfit {}", bf_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_resid(
    input: &PathBuf,
    hist: Option<&str>,
    curve: Option<&str>,
    normalize: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let plot = document::load_plot(input)?;
    let calc = Chi2Calculator::new(&plot);
    let resid = calc.resid_hist(hist, curve, normalize)?;
    tracing::info!(name = %resid.name, points = resid.len(), "residuals computed");

    write_json(output, &resid)
}

/// `chi2` output: the summary plus its derived quantities.
#[derive(Serialize)]
struct Chi2Report<'a> {
    #[serde(flatten)]
    summary: &'a ChiSquareSummary,
    reduced_chi2: Option<f64>,
    p_value: Option<f64>,
}

fn cmd_chi2(
    input: &PathBuf,
    hist: Option<&str>,
    curve: Option<&str>,
    n_fit_params: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    let plot = document::load_plot(input)?;
    let calc = Chi2Calculator::new(&plot);
    let summary = calc.chi_square_summary(curve, hist, n_fit_params)?;
    tracing::info!(chi2 = summary.chi2, ndf = summary.ndf, "chi-square computed");

    let report =
        Chi2Report { summary: &summary, reduced_chi2: summary.reduced(), p_value: summary.p_value() };
    write_json(output, &report)
}

fn write_json<T: Serialize>(output: Option<&PathBuf>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(path) = output {
        std::fs::write(path, json)?;
    } else {
        println!("{json}");
    }
    Ok(())
}
