//! # CXI - Corpus suffix array indexer
//!
//! CXI turns a stream of tokens (one per line) into a dense symbol
//! vocabulary and a suffix array over the tokenized corpus. Empty lines mark
//! sentence boundaries, and suffix comparisons never look past the end of
//! the sentence they started in.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`symbols`] - Red-black tree and symbol table (string interning)
//! - [`index`] - Suffix array building, sorting and persistence
//! - [`error`] - Error type shared by the library
//! - [`utils`] - Configuration, chunked arrays, binary encodings
//!
//! ## Quick Start
//!
//! ```no_run
//! use cxi::index::SuffixIndex;
//! use std::path::Path;
//!
//! let mut index = SuffixIndex::new()?;
//! for token in ["the", "cat", "sat", "", "the", "dog", ""] {
//!     index.append_token(token.as_bytes())?;
//! }
//! index.sort()?;
//! index.save(Path::new("corpus"))?;
//! # Ok::<(), cxi::error::IndexError>(())
//! ```
//!
//! ## Output
//!
//! - `<base>.corpus` - symbol ids in corpus order (native-endian `u32`)
//! - `<base>.suffix` - corpus positions in suffix order (native-endian `u32`)
//! - `<base>.symbols` - one symbol per line in id order, line 0 empty
//! - `<base>.meta.json` - summary counts

pub mod error;
pub mod index;
pub mod symbols;
pub mod utils;
