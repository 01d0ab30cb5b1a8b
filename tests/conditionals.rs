use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const BIN: &str = env!("CARGO_BIN_EXE_easylang");

#[test]
fn if_takes_the_right_branch() -> Result<(), Box<dyn Error>> {
    check_run(
        Path::new(BIN),
        "set x to 7. if x > 5 then print \"big\". else print \"small\". end.",
        "",
        Expected {
            stdout: "big\n",
            stderr: "",
        },
    )?;

    check_run(
        Path::new(BIN),
        "set x to 3. if x > 5 then print \"big\". else print \"small\". end.",
        "",
        Expected {
            stdout: "small\n",
            stderr: "",
        },
    )
}

#[test]
fn and_requires_both_conditions() -> Result<(), Box<dyn Error>> {
    check_run(
        Path::new(BIN),
        "set x to 3. if x > 1 and x < 5 then print \"mid\". end. if x > 1 and x > 5 then print \"no\". end.",
        "",
        Expected {
            stdout: "mid\n",
            stderr: "",
        },
    )
}

#[test]
fn keywords_are_case_insensitive() -> Result<(), Box<dyn Error>> {
    check_run(
        Path::new(BIN),
        "SET x TO 1. IF x == 1 THEN PRINT \"yes\". END.",
        "",
        Expected {
            stdout: "yes\n",
            stderr: "",
        },
    )
}
