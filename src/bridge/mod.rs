//! The bridge between pipeline commands and their external scripts.
//!
//! Each pipeline command runs one linear pass:
//!
//! 1. **Invoke** the stage script ([`invoker`])
//! 2. **Interpret** its stdout ([`result`])
//! 3. **Branch** on the reported status
//! 4. **Enrich** a successful result with the stage's documentation
//!    ([`template`])
//!
//! Any failure ends the pass with a single error report and exit code 1.
//!
//! # Example
//!
//! ```
//! use clipmate::bridge::{interpret, StageOutcome};
//!
//! let outcome = interpret(r#"{"status":"success","project_name":"demo"}"#);
//! assert!(matches!(outcome, StageOutcome::Success(_)));
//! ```

pub mod invoker;
pub mod result;
pub mod template;

pub use invoker::{ScriptInvoker, StageInvoker};
pub use result::{
    excerpt, interpret, locate_document, StageOutcome, StageResult, StageStatus, EXCERPT_LIMIT,
    UNKNOWN_ERROR,
};
pub use template::{load_template, parse_template, CommandTemplate};

use std::path::{Path, PathBuf};

use crate::cli::commands::CommandResult;
use crate::error::{ClipmateError, Result};
use crate::shell::CommandResult as ProcessResult;
use crate::stage::Stage;
use crate::ui::UserInterface;

/// Width of the rule drawn around template bodies.
const RULE_WIDTH: usize = 50;

/// A stage to run and the exact arguments for its script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    pub stage: Stage,
    pub args: Vec<String>,
}

impl StageRequest {
    /// Create a request with no arguments.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag when `enabled`.
    pub fn flag(self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    /// Append `name value` when a value is present.
    pub fn option(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(name).arg(value),
            None => self,
        }
    }
}

/// Orchestrates one stage run against a project.
pub struct CommandBridge<I> {
    invoker: I,
    project_root: PathBuf,
    project_name: Option<String>,
}

impl<I: StageInvoker> CommandBridge<I> {
    /// Create a bridge for a project root.
    ///
    /// `project_name` is only used when a successful result omits
    /// `project_name`.
    pub fn new(invoker: I, project_root: &Path, project_name: Option<String>) -> Self {
        Self {
            invoker,
            project_root: project_root.to_path_buf(),
            project_name,
        }
    }

    /// Run the script and classify its result.
    ///
    /// Returns the result only when the script reported success.
    pub fn resolve(&self, request: &StageRequest) -> Result<StageResult> {
        let output = self.invoker.invoke(request.stage, &request.args)?;
        self.classify(request.stage, output)
    }

    /// Classify captured script output.
    ///
    /// The reported `status` wins over the exit code. The exit code only
    /// decides between `MalformedOutput` and `InvocationFailed` when no
    /// result document is found.
    pub fn classify(&self, stage: Stage, output: ProcessResult) -> Result<StageResult> {
        match interpret(&output.stdout) {
            StageOutcome::Success(result) => {
                if !output.success {
                    tracing::debug!(
                        "{} script exited with {:?} but reported success",
                        stage,
                        output.exit_code
                    );
                }
                Ok(result)
            }
            StageOutcome::Error { message, .. } => {
                Err(ClipmateError::StageReportedError { stage, message })
            }
            StageOutcome::Malformed { excerpt } => {
                if output.success {
                    Err(ClipmateError::MalformedOutput { stage, excerpt })
                } else {
                    Err(ClipmateError::InvocationFailed {
                        stage,
                        exit_code: output.exit_code,
                        stdout: output.stdout,
                        stderr: output.stderr,
                    })
                }
            }
        }
    }

    /// Run the full pass and report the outcome through `ui`.
    pub fn run(&self, request: &StageRequest, ui: &mut dyn UserInterface) -> CommandResult {
        let mut spinner = ui
            .is_interactive()
            .then(|| ui.start_spinner(&format!("Running {}...", request.stage)));

        let resolved = self
            .invoker
            .invoke(request.stage, &request.args)
            .and_then(|output| {
                if ui.output_mode().shows_command_output() && !output.stderr.trim().is_empty() {
                    ui.command_output(output.stderr.trim_end());
                }
                self.classify(request.stage, output)
            });

        if let Some(spinner) = spinner.as_mut() {
            match &resolved {
                Ok(_) => spinner.finish_success(&format!("{} finished", request.stage)),
                Err(_) => spinner.finish_error(&format!("{} failed", request.stage)),
            }
        }

        match resolved {
            Ok(result) => {
                self.render(request.stage, &result, ui);
                CommandResult::success()
            }
            Err(err) => {
                if err.is_integration_failure() {
                    tracing::debug!("{} script integration failed: {}", request.stage, err);
                } else {
                    tracing::debug!("{} reported an error: {}", request.stage, err);
                }
                self.report_failure(&err, ui);
                CommandResult::failure(1)
            }
        }
    }

    /// Print a successful result, with the stage documentation if present.
    pub fn render(&self, stage: Stage, result: &StageResult, ui: &mut dyn UserInterface) {
        match result.project_name.as_deref().or(self.project_name.as_deref()) {
            Some(name) => ui.success(&format!("Project: {}", name)),
            None => ui.success(&format!("{} completed", stage)),
        }

        let path = self.project_root.join(stage.template_path());
        let template = match load_template(&path) {
            Ok(template) => template,
            Err(e) => {
                tracing::warn!("Skipping documentation for {}: {}", stage, e);
                ui.warning(&format!("Could not read {}: {}", path.display(), e));
                None
            }
        };

        let Some(template) = template else {
            return;
        };

        let rule = "─".repeat(RULE_WIDTH);
        ui.message("");
        ui.message(&rule);
        ui.message(template.content.trim_end());
        ui.message(&rule);
        ui.message("");
        ui.message("## Script output");
        ui.message("");
        ui.message("```json");
        ui.message(&result.to_pretty_json());
        ui.message("```");
    }

    /// Report a failed pass.
    pub fn report_failure(&self, err: &ClipmateError, ui: &mut dyn UserInterface) {
        match err {
            ClipmateError::StageReportedError { message, .. } => ui.error(message),
            ClipmateError::ScriptNotFound { stage, .. } => {
                ui.error(&err.to_string());
                ui.show_hint(&format!(
                    "Run `clipmate init` to scaffold a project, or add the {} script",
                    stage
                ));
            }
            ClipmateError::SpawnError { program, .. } => {
                ui.error(&err.to_string());
                ui.show_hint(&format!("Make sure `{}` is installed and on PATH", program));
            }
            ClipmateError::InvocationFailed {
                stage,
                stdout,
                stderr,
                ..
            } => {
                ui.error(&err.to_string());
                let output = if stderr.trim().is_empty() {
                    stdout
                } else {
                    stderr
                };
                ui.show_error_block(
                    &self.invoker.script_path(*stage).display().to_string(),
                    &excerpt(output),
                    None,
                );
            }
            ClipmateError::MalformedOutput { stage, excerpt } => {
                ui.error(&err.to_string());
                ui.show_error_block(
                    &self.invoker.script_path(*stage).display().to_string(),
                    excerpt,
                    Some("Stage scripts must print one JSON object with a \"status\" field"),
                );
            }
            other => ui.error(&other.to_string()),
        }
    }
}
