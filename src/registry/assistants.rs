//! Catalog of supported AI assistants.

use crate::error::{ClipmateError, Result};

/// Where an assistant looks for slash-command files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantProfile {
    /// Identifier accepted by `--ai`.
    pub name: &'static str,
    /// Assistant's config directory, relative to the project root.
    pub dir: &'static str,
    /// Command directory inside `dir`.
    pub commands_dir: &'static str,
    /// Name shown to users.
    pub display_name: &'static str,
}

impl AssistantProfile {
    /// Path of the command directory relative to the project root.
    pub fn commands_path(&self) -> String {
        format!("{}/{}", self.dir, self.commands_dir)
    }
}

macro_rules! profile {
    ($name:literal, $dir:literal, $commands:literal, $display:literal) => {
        AssistantProfile {
            name: $name,
            dir: $dir,
            commands_dir: $commands,
            display_name: $display,
        }
    };
}

/// Supported assistants, in menu order.
pub const ASSISTANTS: [AssistantProfile; 13] = [
    profile!("claude", ".claude", "commands", "Claude Code"),
    profile!("cursor", ".cursor", "commands", "Cursor"),
    profile!("gemini", ".gemini", "commands", "Gemini CLI"),
    profile!("windsurf", ".windsurf", "workflows", "Windsurf"),
    profile!("roocode", ".roo", "commands", "Roo Code"),
    profile!("copilot", ".github", "prompts", "GitHub Copilot"),
    profile!("qwen", ".qwen", "commands", "Qwen Code"),
    profile!("opencode", ".opencode", "command", "OpenCode"),
    profile!("codex", ".codex", "prompts", "Codex CLI"),
    profile!("kilocode", ".kilocode", "workflows", "Kilo Code"),
    profile!("auggie", ".augment", "commands", "Auggie CLI"),
    profile!("codebuddy", ".codebuddy", "commands", "CodeBuddy"),
    profile!("q", ".amazonq", "prompts", "Amazon Q Developer"),
];

/// Assistant used when none is chosen.
pub const DEFAULT_ASSISTANT: &str = "claude";

/// Look up an assistant by identifier.
pub fn find(name: &str) -> Option<&'static AssistantProfile> {
    ASSISTANTS.iter().find(|p| p.name == name)
}

/// Look up an assistant, failing with the list of valid names.
pub fn require(name: &str) -> Result<&'static AssistantProfile> {
    find(name).ok_or_else(|| ClipmateError::UnknownAssistant {
        name: name.to_string(),
        available: names().join(", "),
    })
}

/// All identifiers, in menu order.
pub fn names() -> Vec<&'static str> {
    ASSISTANTS.iter().map(|p| p.name).collect()
}
