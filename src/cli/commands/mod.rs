//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - [`init`] scaffolds a project
//! - [`stage`] runs one of the seven pipeline stages
//! - [`completions`] prints shell completion scripts

pub mod completions;
pub mod dispatcher;
pub mod init;
pub mod stage;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
