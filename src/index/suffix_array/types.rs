//! Types for the suffix array index

use serde::{Deserialize, Serialize};

pub use crate::symbols::{BOUNDARY, SymbolId};

/// Position of a token in the corpus
pub type Position = u32;

/// Extension of the binary corpus file (symbol ids)
pub const CORPUS_EXT: &str = "corpus";

/// Extension of the binary suffix file (sorted positions)
pub const SUFFIX_EXT: &str = "suffix";

/// Extension of the JSON summary written alongside the arrays
pub const META_EXT: &str = "meta.json";

/// Separator placed between the two texts of a fused token
pub const ATTRIBUTE_SEPARATOR: u8 = 0x1d;

/// Summary of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndexMeta {
    /// Number of tokens in the corpus (boundaries included)
    pub token_count: u64,
    /// Number of interned symbols (boundary included)
    pub symbol_count: u64,
    /// Number of boundary tokens in the corpus
    pub boundary_count: u64,
    /// Whether the suffix permutation is sorted
    pub sorted: bool,
}
