//! Process execution.

use crate::error::{ClipmateError, Result};
use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of running a process to completion.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process exited with code 0.
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// A program invocation: executable plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSpec {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ProgramSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Printable form for diagnostics.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Run a program to completion, capturing stdout and stderr.
///
/// Stdin, environment and working directory are inherited. A non-zero exit is not an error here; only a
/// failure to start the process is.
pub fn execute(spec: &ProgramSpec) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Executing: {}", spec.display());

    let output = cmd.output().map_err(|e| ClipmateError::SpawnError {
        program: spec.program.clone(),
        message: e.to_string(),
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "'{}' exited with {:?} after {:?}",
        spec.program,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builds_args_in_order() {
        let spec = ProgramSpec::new("bash")
            .arg("run.sh")
            .args(["--preset", "teaching"]);
        assert_eq!(spec.args, vec!["run.sh", "--preset", "teaching"]);
        assert_eq!(spec.display(), "bash run.sh --preset teaching");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let spec = ProgramSpec::new("clipmate-definitely-not-a-program");
        let result = execute(&spec);
        assert!(matches!(result, Err(ClipmateError::SpawnError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stdout() {
        let spec = ProgramSpec::new("sh").args(["-c", "echo hello"]);
        let result = execute(&spec).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stderr_and_exit_code() {
        let spec = ProgramSpec::new("sh").args(["-c", "echo oops >&2; exit 3"]);
        let result = execute(&spec).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_passes_arguments_verbatim() {
        let spec = ProgramSpec::new("sh").args(["-c", "printf '%s|' \"$@\"", "sh", "a b", "--x"]);
        let result = execute(&spec).unwrap();

        assert_eq!(result.stdout, "a b|--x|");
    }
}
