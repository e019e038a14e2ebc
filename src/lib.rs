//! ClipMate - AI-assisted video editing pipeline.
//!
//! ClipMate scaffolds video projects for AI coding assistants and runs the
//! seven pipeline stages (`import`, `detect`, `cut`, `merge`, `transcribe`,
//! `subtitle`, `export`) by invoking a per-stage script, reading the JSON
//! document it prints and rendering it together with the stage's
//! documentation.
//!
//! # Modules
//!
//! - [`bridge`] - Script invocation, result interpretation and reporting
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Project configuration and discovery
//! - [`error`] - Error types and result aliases
//! - [`registry`] - AI assistant catalog and embedded command templates
//! - [`shell`] - Subprocess execution
//! - [`stage`] - The pipeline stages
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use clipmate::bridge::{interpret, StageOutcome};
//!
//! let outcome = interpret("probing...\n{\"status\":\"error\",\"message\":\"No video\"}");
//! match outcome {
//!     StageOutcome::Error { message, .. } => assert_eq!(message, "No video"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod shell;
pub mod stage;
pub mod ui;

pub use error::{ClipmateError, Result};
