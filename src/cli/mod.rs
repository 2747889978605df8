//! CLI interface
//!
//! This module handles process argument parsing, the interactive shell and
//! dispatch of parsed lines.

pub mod app;

// Re-export main types
pub use app::*;
