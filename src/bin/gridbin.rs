//! gridbin - bin scattered `(x, y, z)` samples from CSV onto a regular grid.
//!
//! Writes `grid.csv`, `counts.csv`, `membership.csv` and `summary.yaml` into
//! the output directory.
//!
//! Run with: `cargo run --release --bin gridbin -- --input samples.csv --binsize 0.3`

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use gridbin::binning::Strategy;
use gridbin::config::BinConfig;
use gridbin::io;

#[derive(Parser, Debug)]
#[command(name = "gridbin", version, about = "Median binning of scattered 2D samples")]
struct Cli {
    /// CSV file with x, y and z columns
    #[arg(short, long)]
    input: PathBuf,

    /// Full width and height of each bin (overrides the config file)
    #[arg(short, long)]
    binsize: Option<f64>,

    /// Membership strategy: scan or bucketed (overrides the config file)
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default tracing subscriber failed")?;

    let config = resolve_config(&cli)?;
    let binner = config.binner().context("invalid binning configuration")?;

    let samples = io::read_samples_from_path(&cli.input)
        .with_context(|| format!("failed to read samples from {}", cli.input.display()))?;
    info!(samples = samples.len(), input = %cli.input.display(), "loaded samples");

    let grid = binner
        .bin(&samples.as_samples()?)
        .context("binning failed")?;
    let summary = grid.summary();

    if summary.value_range.is_none() {
        warn!("every cell is empty");
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    io::write_values(create(&cli.output_dir, "grid.csv")?, grid.values())?;
    io::write_counts(create(&cli.output_dir, "counts.csv")?, grid.counts())?;
    io::write_membership(create(&cli.output_dir, "membership.csv")?, &grid)?;

    let summary_yaml = serde_yaml_ng::to_string(&summary).context("failed to encode summary")?;
    fs::write(cli.output_dir.join("summary.yaml"), summary_yaml)
        .context("failed to write summary.yaml")?;

    info!(
        rows = summary.rows,
        cols = summary.cols,
        occupied = summary.counts.occupied,
        max_count = summary.counts.max,
        output = %cli.output_dir.display(),
        "wrote grid"
    );

    Ok(())
}

/// Defaults, then the config file, then CLI flags.
fn resolve_config(cli: &Cli) -> Result<BinConfig> {
    let mut config = match &cli.config {
        Some(path) => BinConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BinConfig::default(),
    };

    if let Some(binsize) = cli.binsize {
        config.binsize = binsize;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }

    Ok(config)
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{yaml}").unwrap();
        file
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gridbin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let cli = parse(&["--input", "samples.csv"]);
        assert_eq!(resolve_config(&cli).unwrap(), BinConfig::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let file = config_file("binsize: 0.5\nstrategy: bucketed\n");
        let path = file.path().to_str().unwrap();
        let cli = parse(&["--input", "samples.csv", "--config", path]);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.binsize, 0.5);
        assert_eq!(config.strategy, Strategy::Bucketed);
        assert_ne!(config.binsize, BinConfig::default().binsize);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file("binsize: 0.5\nstrategy: bucketed\nmax_cells: 1000\n");
        let path = file.path().to_str().unwrap();
        let cli = parse(&[
            "--input",
            "samples.csv",
            "--config",
            path,
            "--binsize",
            "0.25",
            "--strategy",
            "scan",
        ]);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.binsize, 0.25);
        assert_eq!(config.strategy, Strategy::Scan);
        assert_eq!(config.max_cells, 1000);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = parse(&["--input", "samples.csv", "--config", "/nonexistent/gridbin.yaml"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_unknown_strategy_flag_rejected() {
        let args = ["gridbin", "--input", "samples.csv", "--strategy", "kdtree"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
