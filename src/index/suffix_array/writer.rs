//! Suffix array writer
//!
//! Dumps the corpus and suffix arrays as flat native-endian `u32` files and
//! the symbol table as text, all sharing one base path.

use super::builder::SuffixIndex;
use super::types::*;
use crate::error::{IndexError, Result};
use crate::symbols::{with_extension, with_path};
use crate::utils::write_u32_array;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes the index files
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write all index files next to `base`
    ///
    /// Creates:
    /// - `<base>.corpus`: symbol ids in corpus order
    /// - `<base>.suffix`: the suffix permutation
    /// - `<base>.symbols`: one symbol per line in id order
    /// - `<base>.meta.json`: the [`IndexMeta`] summary
    pub fn write(base: &Path, index: &SuffixIndex) -> Result<()> {
        Self::write_array(&corpus_path(base), &index.corpus)?;
        Self::write_array(&suffix_path(base), &index.suffix)?;
        index.symbols.save_to_path(base)?;
        Self::write_meta(&meta_path(base), &index.meta())
    }

    fn write_meta(path: &Path, meta: &IndexMeta) -> Result<()> {
        let file = File::create(path).map_err(|e| IndexError::io(path, e))?;
        let mut file = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut file, meta)
            .map_err(std::io::Error::from)
            .and_then(|()| file.flush())
            .map_err(|e| IndexError::io(path, e))
    }

    fn write_array(path: &Path, values: &[u32]) -> Result<()> {
        let file = File::create(path).map_err(|e| IndexError::io(path, e))?;
        let mut file = BufWriter::with_capacity(65536, file);
        write_u32_array(&mut file, values)
            .and_then(|()| file.flush())
            .map_err(|e| with_path(IndexError::from(e), path))
    }
}

impl SuffixIndex {
    /// Persist the index to `<base>.corpus`, `<base>.suffix`, `<base>.symbols`
    /// and `<base>.meta.json`
    pub fn save(&self, base: &Path) -> Result<()> {
        SuffixArrayWriter::write(base, self)
    }
}

/// Path of the corpus file for an index base path
pub fn corpus_path(base: &Path) -> PathBuf {
    with_extension(base, CORPUS_EXT)
}

/// Path of the suffix file for an index base path
pub fn suffix_path(base: &Path) -> PathBuf {
    with_extension(base, SUFFIX_EXT)
}

/// Path of the metadata file for an index base path
pub fn meta_path(base: &Path) -> PathBuf {
    with_extension(base, META_EXT)
}
