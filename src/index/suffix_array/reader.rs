//! Suffix array reader
//!
//! Memory-maps the flat corpus and suffix files and copies them into a
//! [`SuffixIndex`], validating their shape on the way in.

use super::builder::SuffixIndex;
use super::types::IndexMeta;
use super::writer::{corpus_path, meta_path, suffix_path};
use crate::error::{IndexError, Result};
use crate::utils::{ChunkedVec, IndexerConfig, WORD_SIZE, decode_u32_array};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Reads the three index files
pub struct SuffixArrayReader;

impl SuffixArrayReader {
    /// Read an index from the files next to `base`
    pub fn read(base: &Path, config: IndexerConfig) -> Result<SuffixIndex> {
        let mut index = SuffixIndex::with_config(config)?;
        let chunk = index.config.alloc_chunk;

        let corpus_file = corpus_path(base);
        let suffix_file = suffix_path(base);
        index.corpus = Self::read_array(&corpus_file, chunk)?;
        index.suffix = Self::read_array(&suffix_file, chunk)?;
        index.symbols.load_from_path(base)?;

        if index.corpus.len() != index.suffix.len() {
            return Err(IndexError::Corrupt {
                path: suffix_file,
                reason: format!(
                    "{} suffix entries for {} corpus tokens",
                    index.suffix.len(),
                    index.corpus.len()
                ),
            });
        }

        let symbol_count = index.symbols.len();
        if let Some(id) = index.corpus.iter().find(|&&id| id as usize >= symbol_count) {
            return Err(IndexError::Corrupt {
                path: corpus_file,
                reason: format!("symbol id {} beyond {} symbols", id, symbol_count),
            });
        }

        let token_count = index.corpus.len();
        let mut seen = vec![false; token_count];
        for &pos in index.suffix.iter() {
            let reason = match seen.get_mut(pos as usize) {
                None => format!("position {} beyond {} tokens", pos, token_count),
                Some(true) => format!("position {} repeated", pos),
                Some(slot) => {
                    *slot = true;
                    continue;
                }
            };
            return Err(IndexError::Corrupt {
                path: suffix_file,
                reason,
            });
        }

        Ok(index)
    }

    /// Read the summary written next to `base`
    pub fn read_meta(base: &Path) -> Result<IndexMeta> {
        let path = meta_path(base);
        let file = File::open(&path).map_err(|e| IndexError::io(&path, e))?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| IndexError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Load a whole native-endian u32 file
    fn read_array(path: &Path, chunk: usize) -> Result<ChunkedVec<u32>> {
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        let len = file.metadata().map_err(|e| IndexError::io(path, e))?.len() as usize;

        let mut values = ChunkedVec::new(chunk);
        if len == 0 {
            return Ok(values);
        }

        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| IndexError::io(path, e))?;
        let decoded = decode_u32_array(&mmap).ok_or_else(|| IndexError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("length {} is not a multiple of {}", len, WORD_SIZE),
        })?;

        values.reserve(len / WORD_SIZE)?;
        for value in decoded {
            values.push(value)?;
        }
        Ok(values)
    }
}

impl SuffixIndex {
    /// Replace this index with the one stored next to `base`
    ///
    /// On error the index is left untouched.
    pub fn load(&mut self, base: &Path) -> Result<()> {
        *self = SuffixArrayReader::read(base, self.config.clone())?;
        Ok(())
    }

    /// Read the index stored next to `base`
    pub fn open(base: &Path, config: IndexerConfig) -> Result<Self> {
        SuffixArrayReader::read(base, config)
    }
}
