//! Morrowsave CLI - converts Morrowind saved games to the OpenMW format.
//!
//! This is the main entry point for the morrowsave command-line application.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use morrowsave::import::check_output_path;
use morrowsave::prelude::*;

/// Morrowsave - Morrowind to OpenMW saved game importer
#[derive(Parser)]
#[command(name = "morrowsave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Legacy saved game (.ess)
    mwsave: PathBuf,

    /// Output saved game (.omwsave), or the second file in compare mode
    output: PathBuf,

    /// Compare the two files record by record instead of converting
    #[arg(short, long)]
    compare: bool,

    /// Code page of the legacy text (win1250, win1251 or win1252)
    #[arg(long, default_value = "win1252", env = "MORROWSAVE_ENCODING")]
    encoding: Encoding,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.compare {
        cmd_compare(&cli.mwsave, &cli.output, cli.encoding)
    } else {
        cmd_convert(&cli.mwsave, &cli.output, cli.encoding)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,morrowsave=debug" } else { "warn,morrowsave=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_convert(input: &Path, output: &Path, encoding: Encoding) -> Result<()> {
    check_output_path(output)?;

    println!("Converting: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let pb = ProgressBar::new(data.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );

    let importer = Importer::new(ImportOptions { encoding });
    let summary = importer
        .convert_with_progress(&data, BufWriter::new(file), |offset, _| pb.set_position(offset as u64))
        .context("Failed to convert saved game")?;

    pb.finish_and_clear();
    println!("Conversion completed in {:?}", start.elapsed());
    println!("{summary}");

    Ok(())
}

fn cmd_compare(first: &Path, second: &Path, encoding: Encoding) -> Result<()> {
    println!("Comparing: {} <-> {}", first.display(), second.display());

    let differences = compare_files(first, second, encoding).context("Failed to read saved games")?;
    for difference in &differences {
        println!("{difference}");
    }

    println!("\nTotal: {} differences", differences.len());

    Ok(())
}
