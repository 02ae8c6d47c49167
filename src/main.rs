use anyhow::{Context, Result};
use clap::Parser;
use cxi::index::build_index;
use cxi::utils::IndexerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cxi")]
#[command(about = "Build a sentence-aware suffix array from tokens on stdin, one per line")]
struct Cli {
    /// Base path of the output files (.corpus, .suffix, .symbols)
    basepath: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = IndexerConfig::load().context("Failed to load configuration")?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    build_index(&mut input, &cli.basepath, &config)?;

    Ok(())
}
