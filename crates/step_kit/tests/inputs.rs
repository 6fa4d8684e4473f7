mod support;

use std::sync::Arc;

use step_kit::{ErrorKind, InputOptions, MemoryEnv};
use support::step_with_env;

fn step(vars: &[(&str, &str)]) -> step_kit::StepContext {
    let env = Arc::new(MemoryEnv::with_vars(vars.iter().copied()));
    step_with_env(env).0
}

#[test]
fn get_input_trims_and_normalizes_name() {
    let step = step(&[("INPUT_MY_NAME", "  value  ")]);
    assert_eq!(step.get_input("my-name", InputOptions::default()).unwrap(), "value");
    assert_eq!(step.get_input("MY_NAME", InputOptions::default()).unwrap(), "value");
    assert_eq!(step.get_input("my name", InputOptions::default()).unwrap(), "value");
    assert_eq!(
        step.get_input("my-name", InputOptions::default().trim_whitespace(false))
            .unwrap(),
        "  value  "
    );
}

#[test]
fn get_input_reads_runner_dash_form() {
    let step = step(&[("INPUT_GITHUB-TOKEN", "abc")]);
    assert_eq!(step.get_input("github-token", InputOptions::required()).unwrap(), "abc");
}

#[test]
fn missing_optional_input_is_empty() {
    let step = step(&[]);
    assert_eq!(step.get_input("nope", InputOptions::default()).unwrap(), "");
}

#[test]
fn missing_required_input_is_configuration_error() {
    let step = step(&[("INPUT_EMPTY", "")]);
    for name in ["empty", "absent"] {
        let err = step.get_input(name, InputOptions::required()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), format!("Input required and not supplied: {name}"));
    }
}

#[test]
fn multiline_input_drops_blank_lines() {
    let step = step(&[("INPUT_FILES", "a.txt\n\n  b.txt  \nc.txt\n")]);
    assert_eq!(
        step.get_multiline_input("files", InputOptions::default())
            .unwrap(),
        ["a.txt", "b.txt", "c.txt"]
    );
    assert_eq!(
        step.get_multiline_input("files", InputOptions::default().trim_whitespace(false))
            .unwrap(),
        ["a.txt", "  b.txt  ", "c.txt"]
    );
}

#[test]
fn boolean_input_accepts_core_schema_literals() {
    let step = step(&[
        ("INPUT_A", "true"),
        ("INPUT_B", "False"),
        ("INPUT_C", " TRUE "),
        ("INPUT_D", "yes"),
    ]);
    let opts = InputOptions::default();
    assert!(step.get_boolean_input("a", opts).unwrap());
    assert!(!step.get_boolean_input("b", opts).unwrap());
    assert!(step.get_boolean_input("c", opts).unwrap());

    let err = step.get_boolean_input("d", opts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueShape);
    assert!(err.to_string().contains("true | True | TRUE | false | False | FALSE"));

    let err = step.get_boolean_input("missing", InputOptions::required()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
