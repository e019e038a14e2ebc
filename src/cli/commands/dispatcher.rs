//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::bridge::StageRequest;
use crate::cli::args::{Cli, Commands};
use crate::config::ScriptType;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    start_dir: PathBuf,
    script_type: Option<ScriptType>,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    ///
    /// `start_dir` is where project discovery begins and where `init`
    /// creates new projects.
    pub fn new(start_dir: PathBuf, script_type: Option<ScriptType>) -> Self {
        Self {
            start_dir,
            script_type,
        }
    }

    /// Get the start directory.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Init(args) => {
                let cmd =
                    super::init::InitCommand::new(&self.start_dir, args.clone(), self.script_type);
                cmd.execute(ui)
            }
            Commands::Import(args) => self.run_stage(args.to_request(), ui),
            Commands::Detect(args) => self.run_stage(args.to_request(), ui),
            Commands::Cut(args) => self.run_stage(args.to_request(), ui),
            Commands::Merge(args) => self.run_stage(args.to_request(), ui),
            Commands::Transcribe(args) => self.run_stage(args.to_request(), ui),
            Commands::Subtitle(args) => self.run_stage(args.to_request(), ui),
            Commands::Export(args) => self.run_stage(args.to_request(), ui),
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }

    fn run_stage(
        &self,
        request: StageRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let cmd = super::stage::StageCommand::new(&self.start_dir, self.script_type, request);
        cmd.execute(ui)
    }
}
