//! Integration tests for shell completion against a config root

mod common;

use common::{create_test_root, write_module};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use wapi::argument::ArgumentParser;
use wapi::completion::{CommandCompleter, Completion, FilePathCompleter, COMMANDS};
use wapi::config::Config;

fn completer_for(config: Config) -> CommandCompleter {
    CommandCompleter::new(
        Rc::new(RefCell::new(ArgumentParser::with_defaults())),
        Box::new(config),
        Box::new(FilePathCompleter::new()),
    )
}

fn texts(completer: &CommandCompleter, line: &str) -> Vec<String> {
    completer
        .get_completions(line, line.len())
        .map(|c| c.text)
        .collect()
}

#[test]
fn test_partial_flag_after_command() {
    let (root, _) = create_test_root("");
    write_module(&root, "user", "requests: []\n");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    let items: Vec<Completion> = completer.get_completions("run --mod", 9).collect();
    assert_eq!(items, vec![Completion::new("--module", 4)]);
}

#[test]
fn test_unknown_first_word_offers_all_commands() {
    let (root, _) = create_test_root("");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    assert_eq!(texts(&completer, "xyz "), COMMANDS);
}

#[test]
fn test_module_values_come_from_module_root() {
    let (root, _) = create_test_root("module_root: requests\n");
    let module_dir = root.path().join("requests");
    fs::create_dir_all(&module_dir).unwrap();
    fs::write(module_dir.join("user.yml"), "").unwrap();
    fs::write(module_dir.join("Order.yml"), "").unwrap();
    fs::write(module_dir.join(".draft.yml"), "").unwrap();
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    assert_eq!(texts(&completer, "run --module "), vec!["Order", "user"]);
    assert_eq!(texts(&completer, "run --module o"), vec!["Order"]);
}

#[test]
fn test_repeated_module_flag_is_still_offered() {
    let (root, _) = create_test_root("");
    write_module(&root, "user", "");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    assert_eq!(
        texts(&completer, "run --module user --verbose "),
        vec!["--config", "--module", "--space"]
    );
}

#[test]
fn test_config_values_complete_file_paths() {
    let (root, _) = create_test_root("");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);
    let dir = format!("{}/", root.path().display());

    let line = format!("run --config {}w", dir);
    let items: Vec<Completion> = completer.get_completions(&line, line.len()).collect();
    assert_eq!(items, vec![Completion::new(format!("{}wapi.yml", dir), 13)]);

    let mut entries = texts(&completer, &format!("run --config {}", dir));
    entries.sort();
    assert_eq!(
        entries,
        vec![format!("{}response/", dir), format!("{}wapi.yml", dir)]
    );
}

#[test]
fn test_missing_module_root_falls_back_to_commands() {
    let (root, _) = create_test_root("");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    assert_eq!(texts(&completer, "run --module "), COMMANDS);
}

#[test]
fn test_value_word_after_flag_offers_commands() {
    let (root, _) = create_test_root("");
    let config = Config::load(root.path()).unwrap();
    let completer = completer_for(config);

    assert_eq!(texts(&completer, "run --space dev "), COMMANDS);
}
