//! Pipeline stages and their script table.
//!
//! Every pipeline command maps to exactly one [`Stage`]. The stage decides
//! which external script is run and which documentation artifact is shown
//! next to its result.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One step of the video-editing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Import,
    Detect,
    Cut,
    Merge,
    Transcribe,
    Subtitle,
    Export,
}

/// Static description of a stage.
#[derive(Debug, Clone, Copy)]
pub struct StageInfo {
    pub stage: Stage,
    /// Script file stem under `scripts/<flavor>/`.
    pub script: &'static str,
    /// Short description shown in generated docs.
    pub summary: &'static str,
}

/// Pipeline order.
pub const STAGES: [StageInfo; 7] = [
    StageInfo {
        stage: Stage::Import,
        script: "import",
        summary: "Import video footage and analyze it",
    },
    StageInfo {
        stage: Stage::Detect,
        script: "detect",
        summary: "Detect silence, repeated frames and scene changes",
    },
    StageInfo {
        stage: Stage::Cut,
        script: "cut",
        summary: "Cut or speed up detected segments",
    },
    StageInfo {
        stage: Stage::Merge,
        script: "merge",
        summary: "Merge cut clips",
    },
    StageInfo {
        stage: Stage::Transcribe,
        script: "transcribe",
        summary: "Transcribe speech into subtitles",
    },
    StageInfo {
        stage: Stage::Subtitle,
        script: "subtitle",
        summary: "Process and burn in subtitles",
    },
    StageInfo {
        stage: Stage::Export,
        script: "export",
        summary: "Export the finished video",
    },
];

impl Stage {
    /// All stages in pipeline order.
    pub fn all() -> impl Iterator<Item = Stage> {
        STAGES.iter().map(|info| info.stage)
    }

    /// Static table entry for this stage.
    pub fn info(self) -> &'static StageInfo {
        // STAGES is declared in enum order.
        &STAGES[self as usize]
    }

    /// Lowercase stage name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Import => "import",
            Stage::Detect => "detect",
            Stage::Cut => "cut",
            Stage::Merge => "merge",
            Stage::Transcribe => "transcribe",
            Stage::Subtitle => "subtitle",
            Stage::Export => "export",
        }
    }

    /// Documentation artifact path, relative to the project root.
    pub fn template_path(self) -> PathBuf {
        PathBuf::from("templates")
            .join("commands")
            .join(format!("{}.md", self.name()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::all()
            .find(|stage| stage.name() == s.to_lowercase())
            .ok_or_else(|| format!("unknown stage: {}", s))
    }
}
