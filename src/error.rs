//! Error types for ClipMate operations.
//!
//! This module defines [`ClipmateError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Stage failures (`ScriptNotFound`, `SpawnError`, `InvocationFailed`,
//!   `MalformedOutput`, `StageReportedError`) are terminal for the current
//!   command and are never retried
//! - Use `anyhow::Error` (via `ClipmateError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

use crate::stage::Stage;

/// Core error type for ClipMate operations.
#[derive(Debug, Error)]
pub enum ClipmateError {
    /// The stage script does not exist for the configured flavor.
    #[error("Script for '{stage}' not found: {path}")]
    ScriptNotFound { stage: Stage, path: PathBuf },

    /// The script interpreter could not be started.
    #[error("Failed to start '{program}': {message}")]
    SpawnError { program: String, message: String },

    /// The script exited non-zero without a usable result document.
    #[error("Script for '{stage}' failed ({})", exit_status(.exit_code))]
    InvocationFailed {
        stage: Stage,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The script produced output that contains no result document.
    #[error("Script for '{stage}' produced no valid JSON result")]
    MalformedOutput { stage: Stage, excerpt: String },

    /// The script reported `status: error`.
    #[error("{message}")]
    StageReportedError { stage: Stage, message: String },

    /// Project configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a command template header.
    #[error("Failed to parse template at {path}: {message}")]
    TemplateParseError { path: PathBuf, message: String },

    /// Target project directory already exists.
    #[error("Project directory \"{}\" already exists", path.display())]
    ProjectExists { path: PathBuf },

    /// `init` was called without a name and without `--here`.
    #[error("Please provide a project name or use --here")]
    MissingProjectName,

    /// Requested AI assistant is not in the catalog.
    #[error("Unsupported AI assistant '{name}' (expected one of: {available})")]
    UnknownAssistant { name: String, available: String },

    /// Requested script type is neither `sh` nor `ps`.
    #[error("Unknown script type '{value}' (expected 'sh' or 'ps')")]
    UnknownScriptType { value: String },

    /// A prompt needs an answer but nobody can give one.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClipmateError {
    /// Whether this error comes from the external script integration
    /// rather than from a result the script reported on purpose.
    pub fn is_integration_failure(&self) -> bool {
        matches!(
            self,
            Self::ScriptNotFound { .. }
                | Self::SpawnError { .. }
                | Self::InvocationFailed { .. }
                | Self::MalformedOutput { .. }
        )
    }
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for ClipMate operations.
pub type Result<T> = std::result::Result<T, ClipmateError>;
