//! chromatic CLI
//!
//! Reads a sparsity pattern and prints a minimum coloring of its column
//! intersection graph.
//!
//! ```text
//! chromatic pattern.txt
//! chromatic --rows --max-colors 8 --timeout-ms 60000 -v pattern.txt
//! ```

use anyhow::{Context, Result};
use chromatic_rs::engine::rustsat_adapter::RustSatAdapter;
use chromatic_rs::matrix::read_matrix;
use chromatic_rs::search::{ColoringSearch, GraphKind, Options, SearchOutcome};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chromatic")]
#[command(about = "Minimum coloring of a sparsity pattern's intersection graph via SAT")]
#[command(version)]
struct Cli {
    /// Sparsity pattern file (one row per line, digits only, 0 = empty)
    file: PathBuf,
    /// Give up after this many colors
    #[arg(long)]
    max_colors: Option<u32>,
    /// Wall-clock budget for the whole search in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Color rows instead of columns
    #[arg(long)]
    rows: bool,
    /// Show verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            max_colors: self.max_colors,
            timeout_ms: self.timeout_ms,
            graph: if self.rows {
                GraphKind::Rows
            } else {
                GraphKind::Columns
            },
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the search and writes the report to `out`
///
/// Returns `Ok(true)` when a coloring was found and `Ok(false)` when the
/// color bound was exhausted.
fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let matrix = read_matrix(&cli.file)
        .with_context(|| format!("failed to read sparsity pattern {}", cli.file.display()))?;

    let search = ColoringSearch::new(cli.options());
    let mut progress: io::Result<()> = Ok(());
    let outcome = search.find_minimum_coloring_with(&matrix, RustSatAdapter::batsat, |k| {
        if progress.is_ok() {
            progress = writeln!(out, "attempting with {k} colors");
        }
    });
    progress.context("failed to write progress")?;
    let outcome = outcome.context("coloring search failed")?;

    match outcome {
        SearchOutcome::Found { coloring, probes } => {
            for (node, color) in coloring.iter() {
                writeln!(out, "node {node} has color c{color}")?;
            }
            writeln!(out, "minimum number of colors: {}", coloring.num_colors())?;
            let total_ms: u64 = probes.iter().map(|p| p.total_time()).sum();
            tracing::info!(probes = probes.len(), total_ms, "search finished");
            Ok(true)
        }
        SearchOutcome::Exhausted { max_colors, .. } => {
            writeln!(out, "no coloring with at most {max_colors} colors")?;
            Ok(false)
        }
    }
}

/// Process exit status: 0 found, 1 bound exhausted, 2 error
fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(&cli, &mut io::stdout().lock());
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
    }
    ExitCode::from(exit_status(&result))
}
