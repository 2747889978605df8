//! Line tokenizer and argument parser
//!
//! The parser is deliberately permissive: it runs on every keystroke while
//! the user is still typing, so unknown flags, stray words and flags that
//! are missing their value are skipped rather than reported.

use crate::argument::namespace::{Namespace, Value};
use crate::error::{ArgumentError, ArgumentResult};
use indexmap::IndexMap;
use tracing::info;

/// Marker that distinguishes a flag token from a bare word
pub const FLAG_PREFIX: &str = "--";

/// How a flag consumes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Take the next token, replacing any earlier value
    Store,

    /// Boolean presence flag; consumes no token
    StoreTrue,

    /// Take the next token, appending to the values seen so far
    Append,
}

impl Action {
    /// The value an argument holds before any token is applied
    pub fn default_value(self) -> Value {
        match self {
            Action::Store => Value::None,
            Action::StoreTrue => Value::Bool(false),
            Action::Append => Value::List(Vec::new()),
        }
    }
}

/// A single recognized argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Name without the flag marker
    pub name: String,

    /// True for the command argument
    pub is_positional: bool,

    pub action: Action,

    /// Only the positional argument is required
    pub required: bool,

    /// Value from the most recent parse
    pub value: Value,
}

impl Argument {
    /// Build an argument from a registration token such as `--config` or `cmd`
    pub fn new(token: &str, action: Action) -> Self {
        let is_positional = !token.starts_with(FLAG_PREFIX);
        Argument {
            name: token.replace(FLAG_PREFIX, ""),
            is_positional,
            action,
            required: is_positional,
            value: action.default_value(),
        }
    }

    /// Reset the value to the action default
    pub fn clear(&mut self) {
        self.value = self.action.default_value();
    }

    /// Flags that accumulate stay meaningful after being set once
    pub fn is_list(&self) -> bool {
        self.action == Action::Append
    }

    /// The token a user types to name this flag
    pub fn flag_token(&self) -> String {
        format!("{}{}", FLAG_PREFIX, self.name)
    }
}

/// Raw input accepted by [`ArgumentParser::parse_args`]
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// A line, split on ASCII spaces with no quoting
    Line(&'a str),

    /// Tokens that were already split
    Tokens(&'a [String]),
}

impl<'a> Input<'a> {
    fn tokens(self) -> Vec<String> {
        match self {
            Input::Line(line) => line.split(' ').map(str::to_string).collect(),
            Input::Tokens(tokens) => tokens.to_vec(),
        }
    }

    fn is_empty(self) -> bool {
        match self {
            Input::Line(line) => line.is_empty(),
            Input::Tokens(tokens) => tokens.is_empty(),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(line: &'a str) -> Self {
        Input::Line(line)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(line: &'a String) -> Self {
        Input::Line(line)
    }
}

impl<'a> From<&'a [String]> for Input<'a> {
    fn from(tokens: &'a [String]) -> Self {
        Input::Tokens(tokens)
    }
}

impl<'a> From<&'a Vec<String>> for Input<'a> {
    fn from(tokens: &'a Vec<String>) -> Self {
        Input::Tokens(tokens)
    }
}

/// Ordered registry of arguments for one shell session
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    arguments: IndexMap<String, Argument>,
    positional: Option<String>,
}

impl ArgumentParser {
    /// Create a parser that only knows `--verbose`
    pub fn new() -> Self {
        let mut parser = ArgumentParser {
            arguments: IndexMap::new(),
            positional: None,
        };
        parser.add_argument("--verbose", Action::StoreTrue);
        parser
    }

    /// Create the parser used by the shell: `cmd --config --module --space --verbose`
    pub fn with_defaults() -> Self {
        let mut parser = Self::new();
        parser.add_argument("cmd", Action::Store);
        parser.add_argument("--config", Action::Store);
        parser.add_argument("--module", Action::Append);
        parser.add_argument("--space", Action::Store);
        parser
    }

    /// Register an argument; an existing name is replaced in place
    pub fn add_argument(&mut self, token: &str, action: Action) {
        let argument = Argument::new(token, action);
        if argument.is_positional {
            self.positional = Some(argument.name.clone());
        } else if self.positional.as_deref() == Some(argument.name.as_str()) {
            self.positional = None;
        }
        self.arguments.insert(argument.name.clone(), argument);
    }

    /// All arguments in registration order
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    pub fn get_argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.get(name)
    }

    /// Name of the positional argument, if one is registered
    pub fn positional_name(&self) -> Option<&str> {
        self.positional.as_deref()
    }

    /// Flag tokens (`--name`) of every non-positional argument
    pub fn flag_tokens(&self) -> Vec<String> {
        self.arguments()
            .filter(|arg| !arg.is_positional)
            .map(Argument::flag_token)
            .collect()
    }

    /// Parse a line or token list into a fresh [`Namespace`].
    ///
    /// Empty input is a no-op and returns `Ok(None)`.
    pub fn parse_args<'a>(&mut self, input: impl Into<Input<'a>>) -> ArgumentResult<Option<Namespace>> {
        let input = input.into();
        if input.is_empty() {
            return Ok(None);
        }
        let tokens = input.tokens();
        info!("args {:?}", tokens);

        self.apply_tokens(&tokens)?;
        let namespace = self.make_namespace()?;
        info!("argument {}", namespace);
        Ok(Some(namespace))
    }

    fn apply_tokens(&mut self, tokens: &[String]) -> ArgumentResult<()> {
        let positional = self
            .positional
            .clone()
            .ok_or(ArgumentError::MissingPositional)?;

        for argument in self.arguments.values_mut() {
            argument.clear();
        }

        let Some(first) = tokens.first() else {
            return Ok(());
        };
        if let Some(cmd) = self.arguments.get_mut(&positional) {
            cmd.value = Value::Str(first.clone());
        }

        let mut i = 1;
        while i < tokens.len() {
            let Some(name) = tokens[i].strip_prefix(FLAG_PREFIX) else {
                i += 1;
                continue;
            };
            let Some(argument) = self.arguments.get_mut(name) else {
                i += 1;
                continue;
            };

            match (argument.action, tokens.get(i + 1)) {
                (Action::StoreTrue, _) => argument.value = Value::Bool(true),
                (Action::Store, Some(next)) => {
                    argument.value = Value::Str(next.clone());
                    i += 1;
                }
                (Action::Append, Some(next)) => {
                    if let Value::List(items) = &mut argument.value {
                        items.push(next.clone());
                    }
                    i += 1;
                }
                // Value still being typed; keep the default
                (_, None) => {}
            }
            i += 1;
        }

        Ok(())
    }

    fn make_namespace(&self) -> ArgumentResult<Namespace> {
        let positional = self
            .positional
            .as_deref()
            .ok_or(ArgumentError::MissingPositional)?;
        let values = self
            .arguments
            .values()
            .map(|arg| (arg.name.clone(), arg.value.clone()))
            .collect();
        Ok(Namespace::new(values, positional))
    }

    /// Flag names worth suggesting as the next token.
    ///
    /// `words` are emitted first, verbatim. Flags already holding a truthy
    /// value in `namespace` are left out unless they accumulate; the
    /// positional argument is never offered.
    pub fn get_completion_words(&self, namespace: &Namespace, words: &[&str]) -> Vec<String> {
        let mut result: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        for argument in self.arguments() {
            if argument.is_positional {
                continue;
            }
            if namespace.is_set(&argument.name) && !argument.is_list() {
                continue;
            }
            result.push(argument.name.clone());
        }
        result
    }
}

impl Default for ArgumentParser {
    fn default() -> Self {
        Self::with_defaults()
    }
}
