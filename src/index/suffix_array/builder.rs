//! Suffix array construction
//!
//! Tokens are interned into the symbol table and appended to the corpus as
//! symbol ids. Sorting orders every corpus position by the suffix starting
//! there, comparing at most one sentence past the first token.

use super::types::*;
use crate::error::{IndexError, Result};
use crate::symbols::SymbolTable;
use crate::utils::{ChunkedVec, IndexerConfig};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Corpus of symbol ids, its suffix permutation and the symbol table
#[derive(Debug, Clone)]
pub struct SuffixIndex {
    pub(super) corpus: ChunkedVec<SymbolId>,
    pub(super) suffix: ChunkedVec<Position>,
    pub(super) symbols: SymbolTable,
    pub(super) config: IndexerConfig,
}

impl SuffixIndex {
    /// Create an empty index with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(IndexerConfig::default())
    }

    /// Create an empty index
    pub fn with_config(config: IndexerConfig) -> Result<Self> {
        Ok(Self {
            corpus: ChunkedVec::new(config.alloc_chunk),
            suffix: ChunkedVec::new(config.alloc_chunk),
            symbols: SymbolTable::with_chunk(config.alloc_chunk)?,
            config,
        })
    }

    /// Intern `text` and append it to the corpus
    ///
    /// The empty string is the sentence boundary; nothing else splits
    /// sentences.
    pub fn append_token(&mut self, text: &[u8]) -> Result<SymbolId> {
        // Positions and the corpus length must both fit in a Position
        if self.corpus.len() >= Position::MAX as usize {
            return Err(IndexError::allocation::<SymbolId>(self.corpus.len() + 1));
        }
        let position = self.corpus.len() as Position;
        let id = self.symbols.intern(text)?;
        self.corpus.push(id)?;
        self.suffix.push(position)?;
        Ok(id)
    }

    /// Compare the suffixes starting at two corpus positions
    pub fn compare_suffixes(&self, pos1: Position, pos2: Position) -> Ordering {
        compare_suffixes(&self.corpus, pos1, pos2)
    }

    /// Sort the suffix permutation
    ///
    /// Positions whose suffixes compare equal are ordered shorter suffix
    /// first, so the result is fully determined by the corpus.
    pub fn sort(&mut self) -> Result<()> {
        let n = self.corpus.len();
        self.suffix.clear();
        self.suffix.reserve(n)?;
        for position in 0..n as Position {
            self.suffix.push(position)?;
        }

        let corpus: &[SymbolId] = &self.corpus;
        let order = |a: &Position, b: &Position| {
            compare_suffixes(corpus, *a, *b).then_with(|| b.cmp(a))
        };

        if self.config.use_parallel_sort(n) {
            let suffix: &mut [Position] = &mut self.suffix;
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.effective_sort_threads())
                .build()
            {
                Ok(pool) => pool.install(|| suffix.par_sort_unstable_by(order)),
                Err(e) => {
                    eprintln!("Sort pool unavailable ({}), using the global pool", e);
                    suffix.par_sort_unstable_by(order)
                }
            }
        } else {
            self.suffix.sort_unstable_by(order);
        }

        Ok(())
    }

    /// Whether every adjacent pair of the permutation is in order
    pub fn is_sorted(&self) -> bool {
        self.suffix
            .windows(2)
            .all(|w| self.compare_suffixes(w[0], w[1]) != Ordering::Greater)
    }

    /// Symbol ids in corpus order
    pub fn corpus(&self) -> &[SymbolId] {
        &self.corpus
    }

    /// Suffix permutation (identity until [`sort`](Self::sort) runs)
    pub fn suffixes(&self) -> &[Position] {
        &self.suffix
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Number of tokens in the corpus
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Number of boundary tokens in the corpus
    pub fn boundary_count(&self) -> usize {
        self.corpus.iter().filter(|&&id| id == BOUNDARY).count()
    }

    /// Token text of every corpus position
    pub fn words(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.corpus.iter().map(|&id| self.symbols.text_of(id))
    }

    pub fn meta(&self) -> IndexMeta {
        IndexMeta {
            token_count: self.corpus.len() as u64,
            symbol_count: self.symbols.len() as u64,
            boundary_count: self.boundary_count() as u64,
            sorted: self.is_sorted(),
        }
    }

    /// Build an index whose tokens join two aligned corpora position by position
    ///
    /// Each token is `left ++ separator ++ right`; positions where both sides
    /// are boundaries stay boundaries. The result is not sorted.
    pub fn fuse(left: &SuffixIndex, right: &SuffixIndex, separator: u8) -> Result<SuffixIndex> {
        if left.len() != right.len() {
            return Err(IndexError::Mismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let mut fused = SuffixIndex::with_config(left.config.clone())?;
        let mut token = Vec::new();
        for (&a, &b) in left.corpus.iter().zip(right.corpus.iter()) {
            if a == BOUNDARY && b == BOUNDARY {
                fused.append_token(b"")?;
                continue;
            }
            token.clear();
            token.extend_from_slice(left.symbols.text_of(a));
            token.push(separator);
            token.extend_from_slice(right.symbols.text_of(b));
            fused.append_token(&token)?;
        }
        Ok(fused)
    }
}

/// Compare the suffixes of `corpus` starting at `pos1` and `pos2`
///
/// - a suffix that runs out first sorts first;
/// - differing symbols order by id;
/// - a shared boundary past the first token ends the comparison as equal;
/// - a suffix made of a lone boundary equals any suffix starting with one.
pub fn compare_suffixes(corpus: &[SymbolId], pos1: Position, pos2: Position) -> Ordering {
    if pos1 == pos2 {
        return Ordering::Equal;
    }
    let a = corpus.get(pos1 as usize..).unwrap_or_default();
    let b = corpus.get(pos2 as usize..).unwrap_or_default();

    for (k, (&x, &y)) in a.iter().zip(b).enumerate() {
        if x != y {
            return x.cmp(&y);
        }
        if x == BOUNDARY && k > 0 {
            return Ordering::Equal;
        }
    }

    // One side is exhausted
    let shorter = a.len().min(b.len());
    if shorter == 1 && a[0] == BOUNDARY {
        return Ordering::Equal;
    }
    a.len().cmp(&b.len())
}
