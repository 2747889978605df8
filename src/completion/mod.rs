//! Interactive completion
//!
//! This module turns a line and cursor position into completion candidates
//! for the shell.

pub mod command;
pub mod cursor;
pub mod source;

// Re-export main types
pub use command::*;
pub use cursor::*;
pub use source::*;
