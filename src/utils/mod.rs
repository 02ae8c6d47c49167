//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Indexer configuration (JSON, XDG config directory)
//! - [`chunked`] - Growable array with fixed-chunk, fallible growth
//! - [`encoding`] - Flat `u32` arrays and byte-line reading
//! - [`progress`] - Spinner that compiles away without the `progress` feature

pub mod app_data;
pub mod chunked;
pub mod encoding;
pub mod progress;

pub use app_data::*;
pub use chunked::*;
pub use encoding::*;
