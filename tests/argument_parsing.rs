//! Integration tests for the shell line argument model

use wapi::argument::{Action, ArgumentParser, Value};

fn scenario_parser() -> ArgumentParser {
    let mut parser = ArgumentParser::new();
    parser.add_argument("cmd", Action::Store);
    parser.add_argument("--config", Action::Store);
    parser
}

#[test]
fn test_store_and_store_true() {
    let mut parser = scenario_parser();
    let ns = parser
        .parse_args("run --config a.yml --verbose")
        .unwrap()
        .unwrap();

    assert_eq!(ns.cmd(), Some("run"));
    assert_eq!(ns.get_str("config"), Some("a.yml"));
    assert!(ns.get_flag("verbose"));
    assert_eq!(ns.len(), 3);
}

#[test]
fn test_trailing_flag_without_value() {
    let mut parser = scenario_parser();
    let ns = parser.parse_args("run --config").unwrap().unwrap();
    assert_eq!(ns.get("config"), Some(&Value::None));
    assert!(!ns.has_args());
}

#[test]
fn test_append_keeps_input_order() {
    let mut parser = ArgumentParser::with_defaults();
    let ns = parser
        .parse_args("run --module a --module b --module a")
        .unwrap()
        .unwrap();
    assert_eq!(ns.get_list("module"), &["a", "b", "a"]);
}

#[test]
fn test_append_trailing_flag_keeps_earlier_values() {
    let mut parser = ArgumentParser::with_defaults();
    let ns = parser.parse_args("run --module a --module").unwrap().unwrap();
    assert_eq!(ns.get_list("module"), &["a"]);
}

#[test]
fn test_positional_is_always_first_token() {
    let mut parser = ArgumentParser::with_defaults();
    for line in [
        "run",
        "--config a.yml",
        "env --space dev",
        "body body body",
        "module --verbose --module user",
    ] {
        let ns = parser.parse_args(line).unwrap().unwrap();
        let first = line.split(' ').next().unwrap();
        assert_eq!(ns.cmd(), Some(first), "line {:?}", line);
    }
}

#[test]
fn test_no_state_leaks_between_parses() {
    let mut parser = ArgumentParser::with_defaults();
    parser
        .parse_args("run --config a.yml --module x --space dev --verbose")
        .unwrap()
        .unwrap();

    let ns = parser.parse_args("env").unwrap().unwrap();
    assert_eq!(ns.get("config"), Some(&Value::None));
    assert_eq!(ns.get("module"), Some(&Value::List(vec![])));
    assert_eq!(ns.get("space"), Some(&Value::None));
    assert_eq!(ns.get("verbose"), Some(&Value::Bool(false)));
    assert!(!ns.has_args());
}

#[test]
fn test_namespaces_are_independent_snapshots() {
    let mut parser = ArgumentParser::with_defaults();
    let first = parser.parse_args("run --space dev").unwrap().unwrap();
    let second = parser.parse_args("run --space prod").unwrap().unwrap();
    assert_eq!(first.get_str("space"), Some("dev"));
    assert_eq!(second.get_str("space"), Some("prod"));
}

#[test]
fn test_pre_split_tokens() {
    let mut parser = ArgumentParser::with_defaults();
    let tokens: Vec<String> = ["run", "--space", "my space"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let ns = parser.parse_args(&tokens).unwrap().unwrap();
    assert_eq!(ns.get_str("space"), Some("my space"));
}

#[test]
fn test_has_args_threshold() {
    let mut parser = ArgumentParser::with_defaults();
    assert!(!parser.parse_args("run").unwrap().unwrap().has_args());
    assert!(parser.parse_args("run --verbose").unwrap().unwrap().has_args());
    assert!(parser
        .parse_args("run --module user")
        .unwrap()
        .unwrap()
        .has_args());
}

#[test]
fn test_completion_words_with_extra_words() {
    let mut parser = ArgumentParser::with_defaults();
    let ns = parser
        .parse_args("run --space dev --module a")
        .unwrap()
        .unwrap();
    let words = parser.get_completion_words(&ns, &["help", "exit"]);
    assert_eq!(words, vec!["help", "exit", "verbose", "config", "module"]);
}
