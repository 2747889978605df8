//! Main CLI application

use crate::argument::{ArgumentParser, Input, Namespace};
use crate::completion::{CommandCompleter, FilePathCompleter};
use crate::config::{resolve_root, Config, DEFAULT_MODULE_NAME};
use crate::error::{Result, WapiError};
use crate::logging::{init_logging, LOG_FILE_NAME};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

const PROMPT: &str = "wapi> ";

/// History file kept inside the config root
const HISTORY_FILE_NAME: &str = ".wapi_history";

/// CLI application
pub struct App {
    /// Configuration of the session's config root
    config: Config,
    /// Shared with the completer; parses are serialized by the shell loop
    parser: Rc<RefCell<ArgumentParser>>,
}

impl App {
    /// Create an app for a config root
    pub fn new(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Ok(Self::with_config(config))
    }

    /// Create an app around an already loaded configuration
    pub fn with_config(config: Config) -> Self {
        App {
            config,
            parser: Rc::new(RefCell::new(ArgumentParser::with_defaults())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute one shell line
    pub fn run_line(&self, line: &str, out: &mut dyn Write) -> Result<()> {
        self.run_input(Input::Line(line.trim()), out)
    }

    /// Parse and execute pre-split tokens
    pub fn run_tokens(&self, tokens: &[String], out: &mut dyn Write) -> Result<()> {
        self.run_input(Input::Tokens(tokens), out)
    }

    fn run_input(&self, input: Input<'_>, out: &mut dyn Write) -> Result<()> {
        let namespace = self.parser.borrow_mut().parse_args(input)?;
        match namespace {
            Some(namespace) => self.execute(&namespace, out),
            None => Ok(()),
        }
    }

    /// Dispatch a parsed line to its command
    pub fn execute(&self, namespace: &Namespace, out: &mut dyn Write) -> Result<()> {
        if namespace.get_flag("verbose") {
            writeln!(out, "{}", namespace)?;
        }

        let loaded;
        let config = match namespace.get_str("config") {
            Some(path) => {
                loaded = Config::load_path(Path::new(path))?;
                &loaded
            }
            None => &self.config,
        };
        let space = namespace.get_str("space").unwrap_or(&config.space_name);
        let modules = selected_modules(namespace);

        let cmd = namespace.cmd().unwrap_or_default();
        info!("execute {} (space {}, modules {:?})", cmd, space, modules);
        match cmd {
            "module" => {
                for name in config.get_modules()? {
                    writeln!(out, "{}", name)?;
                }
            }
            "env" => {
                let env = config.load_env(space)?;
                write!(out, "{}", serde_yaml::to_string(&env)?)?;
            }
            "body" => {
                for name in modules {
                    let module = config.get_module(name, space)?;
                    for request in module.request_names() {
                        let body_name = Config::body_name(space, &module.name, &request);
                        writeln!(out, "{}", config.get_body_path(&body_name).display())?;
                    }
                }
            }
            "run" => {
                for name in modules {
                    let module = config.get_module(name, space)?;
                    writeln!(out, "# {}", module.name)?;
                    write!(out, "{}", module.to_yaml()?)?;
                }
            }
            other => return Err(WapiError::UnknownCommand(other.to_string())),
        }
        Ok(())
    }

    /// Run the interactive shell until end of input
    pub fn run_shell(&self) -> Result<()> {
        let completer = CommandCompleter::new(
            Rc::clone(&self.parser),
            Box::new(self.config.clone()),
            Box::new(FilePathCompleter::new()),
        );
        let mut rl: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
        rl.set_helper(Some(completer));

        let history_path = self.config.root.join(HISTORY_FILE_NAME);
        if let Err(e) = rl.load_history(&history_path) {
            debug!("no history loaded from {}: {}", history_path.display(), e);
        }

        loop {
            let line = match rl.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Eof) => break,
                Err(ReadlineError::Interrupted) => continue,
                Err(e) => return Err(e.into()),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            rl.add_history_entry(line)?;

            let mut stdout = io::stdout().lock();
            match self.run_line(line, &mut stdout) {
                Ok(()) => {}
                // A parser without a command argument is a bug, not bad input
                Err(WapiError::Argument(e)) => return Err(e.into()),
                Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
            }
        }

        if let Err(e) = rl.save_history(&history_path) {
            debug!("failed to save history to {}: {}", history_path.display(), e);
        }
        Ok(())
    }
}

/// Modules named with `--module`, or the default module
fn selected_modules(namespace: &Namespace) -> Vec<&str> {
    let modules = namespace.get_list("module");
    if modules.is_empty() {
        vec![DEFAULT_MODULE_NAME]
    } else {
        modules.iter().map(String::as_str).collect()
    }
}

/// Build the clap command for the process arguments
pub fn build_command() -> Command {
    Command::new("wapi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An interactive, YAML-configured HTTP request shell")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Config root holding wapi.yml (default: $WAPI_ROOT or ~/.wapi)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Write debug records to the log file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(value_parser!(Shell))
                .help("Print a completion script for SHELL and exit"),
        )
        .arg(
            Arg::new("line")
                .value_name("LINE")
                .num_args(1..)
                .trailing_var_arg(true)
                .help("Run one shell line (e.g. `run --module user`) instead of the shell"),
        )
}

/// Line tokens passed on the process command line
fn get_line(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("line")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let matches = build_command().get_matches();

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        clap_complete::generate(*shell, &mut build_command(), "wapi", &mut io::stdout());
        return Ok(());
    }

    let root = resolve_root(matches.get_one::<PathBuf>("root").map(PathBuf::as_path))?;
    fs::create_dir_all(&root)?;
    init_logging(&root.join(LOG_FILE_NAME), matches.get_flag("verbose"))?;

    let app = App::new(&root)?;
    let line = get_line(&matches);
    if line.is_empty() {
        app.run_shell()
    } else {
        app.run_tokens(&line, &mut io::stdout().lock())
    }
}
