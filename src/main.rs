use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bundlescope::analyzer::{Analyzer, AnalyzerOptions};
use bundlescope::export::{self, summary, ExportFormat};
use bundlescope::history::{self, HistoryEntry};

#[derive(Parser)]
#[command(name = "bundlescope")]
#[command(version = "0.1.0")]
#[command(about = "Analyze bundler stats.json output: sizes, duplicates, recommendations", long_about = None)]
struct Cli {
    /// Path to the bundler stats file (e.g. stats.json)
    stats: PathBuf,

    /// Export format: json, csv, or markdown (defaults to a console summary)
    #[arg(short, long)]
    format: Option<String>,

    /// Write the export to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append this run's metrics to a history file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let format = cli
        .format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let mut analyzer = Analyzer::new(AnalyzerOptions::default());
    if cli.verbose {
        analyzer = analyzer.with_progress(|stage| eprintln!("  {stage}..."));
    }

    let result = analyzer
        .analyze_file(&cli.stats)
        .with_context(|| format!("Failed to analyze {}", cli.stats.display()))?;

    match (format, &cli.output) {
        (Some(format), Some(path)) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export::export(format, &result, &mut file)?;
            println!("Report written to {}", path.display());
        }
        (Some(format), None) => {
            let stdout = io::stdout();
            export::export(format, &result, &mut stdout.lock())?;
        }
        (None, output) => {
            // No format: render the console summary (to the file if asked).
            match output {
                Some(path) => {
                    let mut file = File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    summary::write_summary(&result, &mut file)?;
                    println!("Report written to {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut lock = stdout.lock();
                    summary::write_summary(&result, &mut lock)?;
                    lock.flush()?;
                }
            }
        }
    }

    if let Some(history_path) = &cli.history {
        history::record(history_path, HistoryEntry::from_result(&result))
            .context("Failed to update history")?;
    }

    Ok(())
}
