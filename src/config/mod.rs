//! Configuration loading
//!
//! This module handles the `wapi.yml` config root and the module, env and
//! body files it points at.

pub mod module;
pub mod parse;
pub mod types;

// Re-export main types
pub use module::*;
pub use parse::*;
pub use types::*;
