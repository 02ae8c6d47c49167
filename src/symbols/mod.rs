//! String interning
//!
//! - [`rbtree`] - Red-black tree keyed by byte strings
//! - [`table`] - Dense symbol ids with text persistence

pub mod rbtree;
pub mod table;

pub use rbtree::{Insertion, NodeId, StringMap};
pub use table::{BOUNDARY, SYMBOLS_EXT, SymbolId, SymbolTable, symbols_path};
pub(crate) use table::{with_extension, with_path};
