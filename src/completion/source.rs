//! Candidate sources the completer consults

use crate::config::Config;
use crate::error::Result;
use rustyline::completion::FilenameCompleter;

/// Supplies module names for `--module` values
pub trait ModuleSource {
    fn modules(&self) -> Result<Vec<String>>;
}

impl ModuleSource for Config {
    fn modules(&self) -> Result<Vec<String>> {
        self.get_modules()
    }
}

impl ModuleSource for Vec<String> {
    fn modules(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Supplies file-system entries for `--config` values
pub trait PathSource {
    /// Replacements for `partial`, produced lazily
    fn complete_path(&self, partial: &str) -> Result<Box<dyn Iterator<Item = String> + '_>>;
}

/// Paths relative to the working directory, with `~` expansion and escaping
#[derive(Default)]
pub struct FilePathCompleter {
    files: FilenameCompleter,
}

impl FilePathCompleter {
    pub fn new() -> Self {
        FilePathCompleter {
            files: FilenameCompleter::new(),
        }
    }
}

impl PathSource for FilePathCompleter {
    fn complete_path(&self, partial: &str) -> Result<Box<dyn Iterator<Item = String> + '_>> {
        let (_, pairs) = self.files.complete_path(partial, partial.len())?;
        Ok(Box::new(pairs.into_iter().map(|pair| pair.replacement)))
    }
}
