use crate::index::stats::write_stats;
use crate::index::suffix_array::{IndexMeta, SuffixIndex};
use crate::utils::progress::spinner;
use crate::utils::{IndexerConfig, read_line_bytes};
use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

/// How often the reading spinner is refreshed, in tokens
const PROGRESS_EVERY: usize = 1 << 16;

/// Read one token per line from `input` into a fresh index
///
/// Empty lines become sentence boundaries.
pub fn read_tokens<R: BufRead>(input: &mut R, config: &IndexerConfig) -> Result<SuffixIndex> {
    let mut index = SuffixIndex::with_config(config.clone())?;
    let progress = spinner(config.show_progress, "Reading corpus...");

    let mut line = Vec::new();
    while read_line_bytes(input, &mut line).context("Failed to read token stream")? {
        index
            .append_token(&line)
            .with_context(|| format!("Failed to index token {}", index.len()))?;

        if let Some(pb) = &progress {
            if index.len() % PROGRESS_EVERY == 0 {
                pb.set_message(format!("Reading corpus... {} words", index.len()));
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(index)
}

/// Build, sort and save an index from a token stream
///
/// Progress goes to stderr.
pub fn build_index<R: BufRead>(input: &mut R, base: &Path, config: &IndexerConfig) -> Result<IndexMeta> {
    let mut index = read_tokens(input, config)?;
    eprintln!("Corpus read: {} words.", index.len());

    eprintln!("Sorting suffix array...");
    let progress = spinner(config.show_progress, "Sorting...");
    index.sort().context("Failed to sort suffix array")?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    eprintln!("Sorting done! Saving...");
    index
        .save(base)
        .with_context(|| format!("Failed to save index to {}", base.display()))?;

    let meta = index.meta();
    if config.show_progress {
        write_stats(&mut std::io::stderr().lock(), &meta)?;
    }
    eprintln!("Done.");
    Ok(meta)
}
