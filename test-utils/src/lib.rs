//! Helpers for end-to-end tests: write a program to a temporary file, run the
//! interpreter binary on it with a given stdin, and compare the observed
//! streams and exit status.

use std::{
    error::Error,
    io::{self, Write},
    path::Path,
    process::{Command, Output, Stdio},
    str,
};

use tempfile::NamedTempFile;

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_interpreter(bin: &Path, source_path: &Path, input: &str) -> Result<Output, io::Error> {
    let mut child = Command::new(bin)
        .arg(source_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    child.wait_with_output()
}

fn write_program(source: &str) -> Result<NamedTempFile, io::Error> {
    let mut file = NamedTempFile::new()?;
    file.write_all(source.as_bytes())?;
    Ok(file)
}

/// Run `source` through the interpreter and assert both output streams match
/// and the process exits successfully.
pub fn check_run(
    bin: &Path,
    source: &str,
    input: &str,
    expected: Expected,
) -> Result<(), Box<dyn Error>> {
    let file = write_program(source)?;
    let output = run_interpreter(bin, file.path(), input)?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "interpreter exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Run `source` and assert the interpreter fails with exit code 1 and a
/// single-line diagnostic starting with `stderr_prefix`.
pub fn check_failure(
    bin: &Path,
    source: &str,
    input: &str,
    stderr_prefix: &str,
) -> Result<(), Box<dyn Error>> {
    let file = write_program(source)?;
    let output = run_interpreter(bin, file.path(), input)?;

    assert_eq!(Some(1), output.status.code());

    let stderr = str::from_utf8(&output.stderr)?;
    assert!(
        stderr.starts_with(stderr_prefix),
        "unexpected diagnostic: {stderr:?}"
    );
    assert_eq!(1, stderr.lines().count(), "diagnostic is not a single line");

    Ok(())
}
