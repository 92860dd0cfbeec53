//! propr - proportionality analysis CLI
//!
//! Command-line interface over TSV abundance tables.

use clap::{Parser, Subcommand, ValueEnum};
use composable_propr::config::ProprConfig;
use composable_propr::data::LabeledMatrix;
use composable_propr::error::Result;
use composable_propr::normalize::{clo, clr};
use composable_propr::pairs::run;
use composable_propr::stats::{phisym, rho, vlr};
use composable_propr::validate::check_if_requested;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Matrix-valued statistics.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MatrixStat {
    /// Closure: rows rescaled to sum to one
    Clo,
    /// Centered log-ratio transform
    Clr,
    /// Variance of log-ratios
    Vlr,
    /// Symmetric phi of the clr-transformed input
    Phisym,
    /// Proportionality coefficient rho
    Rho,
}

/// Proportionality statistics for compositional data
#[derive(Parser)]
#[command(name = "propr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a transformed or pairwise matrix
    Matrix {
        /// Statistic to compute
        #[arg(value_enum)]
        stat: MatrixStat,

        /// Input TSV (samples as rows, features as columns)
        #[arg(short, long)]
        input: PathBuf,

        /// Output TSV
        #[arg(short, long)]
        output: PathBuf,

        /// Reject negative and missing values
        #[arg(long)]
        check: bool,
    },

    /// Compute the per-pair statistics table
    Pairs {
        /// Input TSV (samples as rows, features as columns)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (TSV, or JSON with --json)
        #[arg(short, long)]
        output: PathBuf,

        /// YAML configuration; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reject negative and missing values
        #[arg(long)]
        check: bool,

        /// Pseudocount added before any log transform
        #[arg(long)]
        pseudocount: Option<f64>,

        /// Keep only pairs with phi at or below this value
        #[arg(long)]
        max_phi: Option<f64>,

        /// Write JSON instead of TSV
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Matrix {
            stat,
            input,
            output,
            check,
        } => cmd_matrix(stat, &input, &output, check),

        Commands::Pairs {
            input,
            output,
            config,
            check,
            pseudocount,
            max_phi,
            json,
        } => cmd_pairs(
            &input,
            &output,
            config.as_deref(),
            check,
            pseudocount,
            max_phi,
            json,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_matrix(stat: MatrixStat, input: &Path, output: &Path, check: bool) -> Result<()> {
    let x = LabeledMatrix::from_tsv(input)?;
    info!(samples = x.nrows(), features = x.ncols(), "loaded {:?}", input);

    let result = match stat {
        MatrixStat::Clo => clo(&x, check)?,
        MatrixStat::Clr => clr(&x, check)?,
        MatrixStat::Vlr => vlr(&x, check)?,
        MatrixStat::Phisym => phisym(&clr(&x, check)?),
        MatrixStat::Rho => {
            check_if_requested(&x, check)?;
            rho(&x)
        }
    };

    result.to_tsv(output)?;
    info!("wrote {:?}", output);
    Ok(())
}

fn cmd_pairs(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    check: bool,
    pseudocount: Option<f64>,
    max_phi: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ProprConfig::from_file(path)?,
        None => ProprConfig::default(),
    };
    config.check |= check;
    if pseudocount.is_some() {
        config.pseudocount = pseudocount;
    }
    if max_phi.is_some() {
        config.max_phi = max_phi;
    }

    let x = LabeledMatrix::from_tsv(input)?;
    info!(samples = x.nrows(), features = x.ncols(), "loaded {:?}", input);

    let table = run(&x, &config)?;

    if json {
        std::fs::write(output, table.to_json()?)?;
    } else {
        table.to_tsv(output)?;
    }
    info!(pairs = table.len(), "wrote {:?}", output);
    Ok(())
}
