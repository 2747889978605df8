//! Shell line argument model
//!
//! This module tokenizes a shell line into a positional command plus named
//! flags and answers which flags are still worth suggesting.

pub mod namespace;
pub mod parse;

// Re-export main types
pub use namespace::*;
pub use parse::*;
