use std::{error::Error, path::Path};

use test_utils::check_failure;

const BIN: &str = env!("CARGO_BIN_EXE_easylang");

#[test]
fn parse_errors_name_the_line() -> Result<(), Box<dyn Error>> {
    check_failure(
        Path::new(BIN),
        "set a to 1\nset b 2\n",
        "",
        "Parse error at line 2: expected 'to' but found number",
    )
}

#[test]
fn missing_end_is_a_parse_error() -> Result<(), Box<dyn Error>> {
    check_failure(
        Path::new(BIN),
        "while 1 do print 1.",
        "",
        "Parse error at line 1: expected 'end' to close 'while'",
    )
}

#[test]
fn undefined_variable_is_a_runtime_error() -> Result<(), Box<dyn Error>> {
    check_failure(
        Path::new(BIN),
        "print missing.",
        "",
        "Error: Undefined variable missing",
    )
}

#[test]
fn division_by_zero_is_a_runtime_error() -> Result<(), Box<dyn Error>> {
    check_failure(Path::new(BIN), "print 1 / 0.", "", "Error: Division by zero")
}

#[test]
fn non_numeric_condition_is_a_runtime_error() -> Result<(), Box<dyn Error>> {
    check_failure(
        Path::new(BIN),
        "if \"yes\" then print 1. end.",
        "",
        "Error: Condition must be numeric",
    )
}
