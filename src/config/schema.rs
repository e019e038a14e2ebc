//! Project configuration schema.
//!
//! These types mirror the JSON files written under `.clipmate/` by
//! `clipmate init`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClipmateError;

/// Marker stored in `config.json` to identify a ClipMate project.
pub const PROJECT_TYPE: &str = "clipmate-project";

/// Version of the project layout written by `init`.
pub const PROJECT_LAYOUT_VERSION: &str = "0.1.0";

/// Flavor of the per-stage scripts a project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ScriptType {
    /// POSIX shell scripts under `scripts/bash/`.
    #[default]
    #[serde(rename = "sh")]
    #[value(name = "sh")]
    Posix,
    /// PowerShell scripts under `scripts/powershell/`.
    #[serde(rename = "ps")]
    #[value(name = "ps")]
    PowerShell,
}

impl ScriptType {
    /// Tag as stored in `config.json`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Posix => "sh",
            Self::PowerShell => "ps",
        }
    }

    /// Directory under `scripts/` holding this flavor's scripts.
    pub fn scripts_dir(self) -> &'static str {
        match self {
            Self::Posix => "bash",
            Self::PowerShell => "powershell",
        }
    }

    /// Script file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Posix => "sh",
            Self::PowerShell => "ps1",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Posix => "POSIX Shell (macOS/Linux)",
            Self::PowerShell => "PowerShell (Windows)",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ScriptType {
    type Err = ClipmateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sh" | "bash" => Ok(Self::Posix),
            "ps" | "powershell" => Ok(Self::PowerShell),
            _ => Err(ClipmateError::UnknownScriptType {
                value: s.to_string(),
            }),
        }
    }
}

/// Contents of `.clipmate/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,

    #[serde(rename = "type", default = "default_project_type")]
    pub project_type: String,

    /// Name of the AI assistant profile chosen at init.
    #[serde(default)]
    pub ai: Option<String>,

    #[serde(default)]
    pub script_type: ScriptType,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub version: Option<String>,
}

fn default_project_type() -> String {
    PROJECT_TYPE.to_string()
}

impl ProjectConfig {
    /// Create a fresh config stamped with the current time.
    pub fn new(name: &str, ai: &str, script_type: ScriptType) -> Self {
        Self {
            name: name.to_string(),
            project_type: PROJECT_TYPE.to_string(),
            ai: Some(ai.to_string()),
            script_type,
            created: Some(Utc::now()),
            version: Some(PROJECT_LAYOUT_VERSION.to_string()),
        }
    }
}

/// Contents of `.clipmate/aliyun.json`, read only by the transcribe script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliyunConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub asr: AsrConfig,
}

/// Speech recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrConfig {
    pub app_key: String,
    pub model: String,
    pub format: String,
    pub sample_rate: u32,
    pub enable_punctuation: bool,
    pub enable_inverse_text_normalization: bool,
    pub enable_words: bool,
    pub max_single_segment_time: u32,
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            model: "generic".to_string(),
            format: "mp3".to_string(),
            sample_rate: 16000,
            enable_punctuation: true,
            enable_inverse_text_normalization: true,
            enable_words: true,
            max_single_segment_time: 15000,
        }
    }
}
