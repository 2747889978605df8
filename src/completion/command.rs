//! Command line completion
//!
//! [`CommandCompleter`] decides, from the line and cursor alone, whether the
//! user is choosing a command, a flag, a `--config` path or a `--module`
//! name, and yields matching candidates lazily. Any failure while doing so
//! falls back to the command names so the shell never stalls.

use crate::argument::{ArgumentParser, Namespace, FLAG_PREFIX};
use crate::completion::cursor::CursorContext;
use crate::completion::source::{ModuleSource, PathSource};
use crate::error::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info};

/// Commands the shell dispatches
pub const COMMANDS: &[&str] = &["run", "body", "env", "module"];

/// Flag whose value is a file-system path
pub const CONFIG_FLAG: &str = "--config";

/// Flag whose value is a module name
pub const MODULE_FLAG: &str = "--module";

/// One suggestion, replacing the line from `start` up to the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub start: usize,
}

impl Completion {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        Completion {
            text: text.into(),
            start,
        }
    }
}

/// Lazy candidate sequence for one request
pub type Completions<'a> = Box<dyn Iterator<Item = Completion> + 'a>;

/// What kind of candidates a request calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Commands,
    Paths,
    Modules,
    Flags,
}

/// Classify the completed word left of the cursor.
///
/// Words outside `commands` and `flags` (or no word at all) mean the user
/// has not settled on a command yet.
pub fn classify(word: Option<&str>, commands: &[String], flags: &[String]) -> Target {
    let Some(word) = word else {
        return Target::Commands;
    };
    let known = commands.iter().chain(flags).any(|w| w == word);
    if !known {
        return Target::Commands;
    }
    match word {
        CONFIG_FLAG => Target::Paths,
        MODULE_FLAG => Target::Modules,
        _ => Target::Flags,
    }
}

/// Keep the `words` that start with `prefix`
fn word_completions<'a>(
    words: Vec<String>,
    prefix: &'a str,
    start: usize,
    ignore_case: bool,
) -> Completions<'a> {
    let lowered = prefix.to_lowercase();
    Box::new(words.into_iter().filter_map(move |word| {
        let matched = if ignore_case {
            word.to_lowercase().starts_with(&lowered)
        } else {
            word.starts_with(prefix)
        };
        matched.then(|| Completion::new(word, start))
    }))
}

/// Completer for the interactive shell
pub struct CommandCompleter {
    parser: Rc<RefCell<ArgumentParser>>,
    modules: Box<dyn ModuleSource>,
    paths: Box<dyn PathSource>,
    commands: Vec<String>,
    /// Second-to-last word seen by the last request, for diagnostics
    last_second_word_before_cursor: RefCell<Option<String>>,
}

impl CommandCompleter {
    pub fn new(
        parser: Rc<RefCell<ArgumentParser>>,
        modules: Box<dyn ModuleSource>,
        paths: Box<dyn PathSource>,
    ) -> Self {
        CommandCompleter {
            parser,
            modules,
            paths,
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            last_second_word_before_cursor: RefCell::new(None),
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn last_second_word_before_cursor(&self) -> Option<String> {
        self.last_second_word_before_cursor.borrow().clone()
    }

    /// Candidates for `line` with the cursor at byte offset `pos`
    pub fn get_completions<'a>(&'a self, line: &'a str, pos: usize) -> Completions<'a> {
        let ctx = CursorContext::new(line, pos);

        if let Some(word) = ctx.last_second_word() {
            *self.last_second_word_before_cursor.borrow_mut() = Some(word.to_string());
        }
        info!(
            "last_second_word_before_cursor {:?}",
            self.last_second_word_before_cursor.borrow()
        );

        match self.classified_completions(ctx) {
            Ok(completions) => completions,
            Err(e) => {
                error!("completion failed for {:?}: {}", ctx.text_before_cursor(), e);
                self.command_completions(ctx)
            }
        }
    }

    fn classified_completions<'a>(&'a self, ctx: CursorContext<'a>) -> Result<Completions<'a>> {
        let word = ctx.word_for_completion();
        let flags = self.parser.borrow().flag_tokens();
        let target = classify(word, &self.commands, &flags);
        info!("word_for_completion {:?} -> {:?}", word, target);

        let prefix = ctx.word_before_cursor();
        let start = ctx.word_start();
        match target {
            Target::Commands => Ok(self.command_completions(ctx)),
            Target::Paths => Ok(Box::new(
                self.paths
                    .complete_path(prefix)?
                    .map(move |path| Completion::new(path, start)),
            )),
            Target::Modules => {
                let modules = self.modules.modules()?;
                Ok(word_completions(modules, prefix, start, true))
            }
            Target::Flags => {
                let namespace = self
                    .parser
                    .borrow_mut()
                    .parse_args(ctx.text_before_cursor())?
                    .unwrap_or_default();
                let flags = self.flag_words(&namespace);
                Ok(word_completions(flags, prefix, start, false))
            }
        }
    }

    fn flag_words(&self, namespace: &Namespace) -> Vec<String> {
        self.parser
            .borrow()
            .get_completion_words(namespace, &[])
            .into_iter()
            .map(|name| format!("{}{}", FLAG_PREFIX, name))
            .collect()
    }

    fn command_completions<'a>(&'a self, ctx: CursorContext<'a>) -> Completions<'a> {
        word_completions(
            self.commands.clone(),
            ctx.word_before_cursor(),
            ctx.word_start(),
            true,
        )
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = CursorContext::new(line, pos).word_start();
        let pairs = self
            .get_completions(line, pos)
            .map(|c| Pair {
                display: c.text.clone(),
                replacement: c.text,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
