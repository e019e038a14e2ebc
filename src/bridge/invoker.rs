//! Stage script invocation.

use std::path::{Path, PathBuf};

use crate::config::ScriptType;
use crate::error::{ClipmateError, Result};
use crate::shell::{execute, CommandResult, Interpreter};
use crate::stage::Stage;

/// Runs the external script behind a stage.
///
/// Implementations are stateless between calls.
pub trait StageInvoker {
    /// Where the script for `stage` is expected.
    fn script_path(&self, stage: Stage) -> PathBuf;

    /// Run the script with `args` and wait for it to exit.
    fn invoke(&self, stage: Stage, args: &[String]) -> Result<CommandResult>;
}

/// Invoker for scripts under `<root>/scripts/<flavor>/`.
#[derive(Debug, Clone)]
pub struct ScriptInvoker {
    project_root: PathBuf,
    script_type: ScriptType,
}

impl ScriptInvoker {
    /// Create an invoker for a project root and script flavor.
    pub fn new(project_root: &Path, script_type: ScriptType) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            script_type,
        }
    }
}

impl StageInvoker for ScriptInvoker {
    fn script_path(&self, stage: Stage) -> PathBuf {
        self.project_root
            .join("scripts")
            .join(self.script_type.scripts_dir())
            .join(format!(
                "{}.{}",
                stage.info().script,
                self.script_type.extension()
            ))
    }

    fn invoke(&self, stage: Stage, args: &[String]) -> Result<CommandResult> {
        let path = self.script_path(stage);
        if !path.is_file() {
            return Err(ClipmateError::ScriptNotFound { stage, path });
        }

        let spec = Interpreter::for_script_type(self.script_type)
            .spec_for(&path)
            .args(args.iter().map(String::as_str));

        tracing::debug!("Invoking {} stage: {}", stage, spec.display());
        execute(&spec)
    }
}
