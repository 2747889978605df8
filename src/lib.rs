//! wapi - an interactive, YAML-configured HTTP request shell
//!
//! Requests are described by module files under a config root. The shell
//! parses each line into a command plus flags and offers context-sensitive
//! tab completion while the line is being typed.

// Public modules
pub mod argument;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, WapiError};

/// Current version of wapi
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
