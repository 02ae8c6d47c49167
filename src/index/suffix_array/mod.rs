//! Suffix array indexing module
//!
//! Orders every position of a tokenized corpus by the suffix that starts
//! there. Comparisons stop at the end of the sentence they started in, so
//! sorting cost stays bounded by sentence length rather than corpus length.
//!
//! ## Architecture
//!
//! - `builder`: Appends tokens, compares and sorts suffixes
//! - `writer`: Persists the index to disk
//! - `reader`: Memory-mapped loading and validation
//! - `types`: Core type definitions
//!
//! ## File Format
//!
//! Per base path, four files are created:
//! - `<base>.corpus`: symbol ids, native-endian `u32`, no header
//! - `<base>.suffix`: sorted corpus positions, native-endian `u32`, no header
//! - `<base>.symbols`: one symbol per line in id order, line 0 empty
//! - `<base>.meta.json`: token, symbol and boundary counts (informational,
//!   not needed for loading)

pub mod builder;
pub mod reader;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use builder::{SuffixIndex, compare_suffixes};
pub use reader::SuffixArrayReader;
pub use types::{ATTRIBUTE_SEPARATOR, CORPUS_EXT, IndexMeta, META_EXT, Position, SUFFIX_EXT};
pub use writer::{SuffixArrayWriter, corpus_path, meta_path, suffix_path};
