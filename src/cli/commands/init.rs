//! Init command implementation.
//!
//! The `clipmate init` command scaffolds a video project: directory layout,
//! project config, speech recognition credential template, command
//! templates for the chosen AI assistant and a README.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{write_json, AliyunConfig, ProjectConfig, ScriptType, CONFIG_DIR, CONFIG_FILE};
use crate::error::{ClipmateError, Result};
use crate::registry::{assistants, command_templates, AssistantProfile, DEFAULT_ASSISTANT};
use crate::stage::Stage;
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Media directories every project gets.
pub const MEDIA_DIRS: [&str; 4] = ["videos", "clips", "subtitles", "exports"];

/// Name used with `--here` when the directory has no usable name.
const FALLBACK_NAME: &str = "clipmate-project";

/// What `init` is about to create.
#[derive(Debug, Clone)]
pub struct InitPlan {
    pub name: String,
    pub path: PathBuf,
    pub assistant: &'static AssistantProfile,
    pub script_type: ScriptType,
    pub here: bool,
}

/// The init command implementation.
pub struct InitCommand {
    cwd: PathBuf,
    args: InitArgs,
    script_type: Option<ScriptType>,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(cwd: &Path, args: InitArgs, script_type: Option<ScriptType>) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            args,
            script_type,
        }
    }

    /// Ask for assistant and script type, or take them from flags.
    fn choose(&self, ui: &mut dyn UserInterface) -> Result<(String, ScriptType)> {
        if !(ui.is_interactive() && self.args.ai.is_none()) {
            let ai = self
                .args
                .ai
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSISTANT.to_string());
            return Ok((ai, self.script_type.unwrap_or_default()));
        }

        ui.show_header("ClipMate - AI-assisted video editing");

        ui.show_step(1, 2, "Choose your AI assistant");
        let options = assistants::ASSISTANTS
            .iter()
            .map(|p| PromptOption::new(p.name, p.display_name))
            .collect();
        let ai = ui.prompt(
            &Prompt::select("ai", "AI assistant", options).with_default(DEFAULT_ASSISTANT),
        )?;

        ui.show_step(2, 2, "Choose script type");
        let options = [ScriptType::Posix, ScriptType::PowerShell]
            .iter()
            .map(|t| PromptOption::new(t.tag(), t.label()))
            .collect();
        let default = self.script_type.unwrap_or_default();
        let choice = ui.prompt(
            &Prompt::select("script_type", "Script type", options).with_default(default.tag()),
        )?;

        Ok((ai, choice.parse()?))
    }

    /// Validate the target and resolve the assistant profile.
    pub fn plan(&self, ai: &str, script_type: ScriptType) -> Result<InitPlan> {
        let (name, path) = if self.args.here {
            let name = self
                .cwd
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(FALLBACK_NAME)
                .to_string();
            (name, self.cwd.clone())
        } else {
            let name = self
                .args
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .ok_or(ClipmateError::MissingProjectName)?;
            let path = self.cwd.join(&name);
            if path.exists() {
                return Err(ClipmateError::ProjectExists { path });
            }
            (name, path)
        };

        Ok(InitPlan {
            name,
            path,
            assistant: assistants::require(ai)?,
            script_type,
            here: self.args.here,
        })
    }

    /// Create the project on disk.
    pub fn scaffold(&self, plan: &InitPlan) -> Result<()> {
        let root = &plan.path;
        let commands_dir = root.join(plan.assistant.dir).join(plan.assistant.commands_dir);

        fs::create_dir_all(root.join(CONFIG_DIR))?;
        fs::create_dir_all(&commands_dir)?;
        for dir in MEDIA_DIRS {
            fs::create_dir_all(root.join(dir))?;
        }

        let config = ProjectConfig::new(&plan.name, plan.assistant.name, plan.script_type);
        write_json(&root.join(CONFIG_DIR).join(CONFIG_FILE), &config)?;
        write_json(
            &root.join(CONFIG_DIR).join("aliyun.json"),
            &AliyunConfig::default(),
        )?;

        let templates_dir = root.join("templates").join("commands");
        fs::create_dir_all(&templates_dir)?;
        for template in command_templates() {
            fs::write(templates_dir.join(template.file_name), template.contents)?;
            fs::write(commands_dir.join(template.file_name), template.contents)?;
        }

        fs::create_dir_all(root.join("scripts").join(plan.script_type.scripts_dir()))?;
        fs::create_dir_all(root.join("scripts").join("python"))?;

        fs::write(root.join("README.md"), readme(plan))?;

        tracing::debug!(
            "Scaffolded {} for {} at {}",
            plan.name,
            plan.assistant.name,
            root.display()
        );
        Ok(())
    }

    fn show_next_steps(&self, plan: &InitPlan, ui: &mut dyn UserInterface) {
        ui.message("");
        ui.message("Next steps:");
        if !plan.here {
            ui.message(&format!("  • cd {}", plan.name));
        }
        ui.message("  • Put your video files in videos/");
        ui.message("  • Run /import to import a video");
        ui.message("  • Run /detect to start detection");
        ui.message("  • Add Aliyun keys to .clipmate/aliyun.json (needed for subtitles)");
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (ai, script_type) = self.choose(ui)?;

        let mut spinner = ui.start_spinner("Initializing ClipMate project...");
        let plan = match self
            .plan(&ai, script_type)
            .and_then(|plan| self.scaffold(&plan).map(|()| plan))
        {
            Ok(plan) => plan,
            Err(e) => {
                spinner.finish_error("Project initialization failed");
                return Err(e);
            }
        };
        spinner.finish_success(&format!("Project \"{}\" initialized", plan.name));

        self.show_next_steps(&plan, ui);
        Ok(CommandResult::success())
    }
}

/// README written at the project root.
fn readme(plan: &InitPlan) -> String {
    let mut pipeline = String::new();
    for (i, stage) in Stage::all().enumerate() {
        pipeline.push_str(&format!(
            "/{:<13}# {}. {}\n",
            stage.name(),
            i + 1,
            stage.info().summary
        ));
    }

    let flavor = plan.script_type.scripts_dir();
    let flavor_label = match plan.script_type {
        ScriptType::Posix => "Bash",
        ScriptType::PowerShell => "PowerShell",
    };

    format!(
        r#"# {name}

Video editing project created with ClipMate.

## Setup

- **AI assistant**: {assistant}
- **Script type**: {script_label}

## Editing pipeline

Run the slash commands in order:

```bash
{pipeline}```

## Layout

- `videos/` - source footage
- `clips/` - cut clips and detection reports
- `subtitles/` - subtitle files
- `exports/` - finished videos
- `scripts/{flavor}/` - {flavor_label} stage scripts
- `scripts/python/` - Python video processing scripts
- `templates/` - AI prompt templates
- `.clipmate/` - project configuration
- `{assistant_dir}/` - {assistant} configuration

## Aliyun API

Fill in your keys in `.clipmate/aliyun.json`:

```json
{{
  "access_key_id": "your_access_key_id",
  "access_key_secret": "your_access_key_secret",
  "asr": {{
    "app_key": "your_asr_app_key"
  }}
}}
```

Keys are issued at https://ram.console.aliyun.com/
"#,
        name = plan.name,
        assistant = plan.assistant.display_name,
        script_label = plan.script_type.label(),
        pipeline = pipeline,
        flavor = flavor,
        flavor_label = flavor_label,
        assistant_dir = plan.assistant.dir,
    )
}
