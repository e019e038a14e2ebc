//! Pipeline stage commands.
//!
//! `clipmate import`, `detect`, `cut`, `merge`, `transcribe`, `subtitle`
//! and `export` all run through [`StageCommand`]: resolve the project, run
//! its script through the bridge, report.

use std::path::{Path, PathBuf};

use crate::bridge::{CommandBridge, ScriptInvoker, StageRequest};
use crate::config::{ProjectContext, ScriptType};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Runs one pipeline stage.
pub struct StageCommand {
    start_dir: PathBuf,
    script_type: Option<ScriptType>,
    request: StageRequest,
}

impl StageCommand {
    /// Create a stage command.
    pub fn new(start_dir: &Path, script_type: Option<ScriptType>, request: StageRequest) -> Self {
        Self {
            start_dir: start_dir.to_path_buf(),
            script_type,
            request,
        }
    }
}

impl Command for StageCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = ProjectContext::discover(&self.start_dir, self.script_type)?;
        let invoker = ScriptInvoker::new(&project.root, project.script_type);
        let bridge = CommandBridge::new(invoker, &project.root, project.name().map(String::from));

        tracing::debug!(
            "Running {} with args {:?}",
            self.request.stage,
            self.request.args
        );
        Ok(bridge.run(&self.request, ui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_script(stage: &str, body: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".clipmate")).unwrap();
        fs::write(
            temp.path().join(".clipmate/config.json"),
            r#"{"name": "lecture", "scriptType": "sh"}"#,
        )
        .unwrap();
        let scripts = temp.path().join("scripts/bash");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join(format!("{}.sh", stage)), body).unwrap();
        temp
    }

    #[test]
    fn missing_script_reports_failure() {
        let temp = TempDir::new().unwrap();
        let cmd = StageCommand::new(temp.path(), None, StageRequest::new(Stage::Cut));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("scripts/bash/cut.sh"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".clipmate")).unwrap();
        fs::write(temp.path().join(".clipmate/config.json"), "{oops").unwrap();

        let cmd = StageCommand::new(temp.path(), None, StageRequest::new(Stage::Merge));
        let mut ui = MockUI::new();
        assert!(cmd.execute(&mut ui).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn runs_script_from_nested_directory() {
        let temp = project_with_script("merge", "echo '{\"status\":\"success\"}'\n");
        let nested = temp.path().join("clips/day1");
        fs::create_dir_all(&nested).unwrap();

        let cmd = StageCommand::new(&nested, None, StageRequest::new(Stage::Merge));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_success("Project: lecture"));
    }

    #[cfg(unix)]
    #[test]
    fn reported_error_message_is_verbatim() {
        let temp = project_with_script(
            "import",
            "echo '{\"status\":\"error\",\"message\":\"No video in videos/\"}'\n",
        );

        let cmd = StageCommand::new(temp.path(), None, StageRequest::new(Stage::Import));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors(), ["No video in videos/"]);
    }

    #[test]
    fn script_type_override_changes_lookup() {
        let temp = TempDir::new().unwrap();
        let cmd = StageCommand::new(
            temp.path(),
            Some(ScriptType::PowerShell),
            StageRequest::new(Stage::Export),
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_error("export.ps1"));
    }
}
