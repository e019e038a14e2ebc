//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Each pipeline subcommand
//! turns its arguments into a [`StageRequest`] with the exact argument
//! vector its script receives.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::bridge::StageRequest;
use crate::config::ScriptType;
use crate::stage::Stage;
use crate::ui::OutputMode;

/// ClipMate - AI-assisted video editing pipeline.
#[derive(Debug, Parser)]
#[command(name = "clipmate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Script flavor to run (overrides the project's scriptType)
    #[arg(long, global = true, value_enum, env = "CLIPMATE_SCRIPT_TYPE")]
    pub script_type: Option<ScriptType>,

    /// Show verbose output, including script stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output mode selected by the global flags.
    pub fn output_mode(&self) -> OutputMode {
        if self.verbose {
            OutputMode::Verbose
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a ClipMate project (AI assistant commands and layout)
    Init(InitArgs),

    /// Import video footage and analyze it
    Import(ImportArgs),

    /// Detect silence, repeated frames and scene changes
    Detect(DetectArgs),

    /// Cut or speed up detected segments
    Cut(CutArgs),

    /// Merge cut clips
    Merge(MergeArgs),

    /// Transcribe speech into subtitles (Aliyun ASR)
    Transcribe(TranscribeArgs),

    /// Process and burn in subtitles
    Subtitle(SubtitleArgs),

    /// Export the finished video
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Project name (a directory with this name is created)
    pub name: Option<String>,

    /// Initialize in the current directory
    #[arg(long)]
    pub here: bool,

    /// AI assistant to generate commands for
    #[arg(long = "ai", value_name = "TYPE")]
    pub ai: Option<String>,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ImportArgs {
    /// Video file to import
    pub video: Option<String>,
}

impl ImportArgs {
    pub fn to_request(&self) -> StageRequest {
        match &self.video {
            Some(video) => StageRequest::new(Stage::Import).arg(video.as_str()),
            None => StageRequest::new(Stage::Import),
        }
    }
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Detection preset (teaching, vlog, interview)
    #[arg(long)]
    pub preset: Option<String>,
}

impl DetectArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Detect).option("--preset", self.preset.as_deref())
    }
}

/// Arguments for the `cut` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CutArgs {
    /// Apply every suggestion without asking
    #[arg(long)]
    pub auto: bool,

    /// Confirm each segment
    #[arg(long)]
    pub interactive: bool,
}

impl CutArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Cut)
            .flag("--auto", self.auto)
            .flag("--interactive", self.interactive)
    }
}

/// Arguments for the `merge` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MergeArgs {}

impl MergeArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Merge)
    }
}

/// Arguments for the `transcribe` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TranscribeArgs {
    /// Recognition model
    #[arg(long)]
    pub model: Option<String>,

    /// Spoken language
    #[arg(long, default_value = "zh")]
    pub lang: String,
}

impl TranscribeArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Transcribe)
            .option("--model", self.model.as_deref())
            .option("--lang", Some(self.lang.as_str()))
    }
}

/// Arguments for the `subtitle` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SubtitleArgs {
    /// Burn subtitles into the video frames
    #[arg(long)]
    pub burn: bool,

    /// Subtitle style
    #[arg(long)]
    pub style: Option<String>,
}

impl SubtitleArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Subtitle)
            .flag("--burn", self.burn)
            .option("--style", self.style.as_deref())
    }
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Target platform preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Output quality (low, medium, high)
    #[arg(long, default_value = "high")]
    pub quality: String,
}

impl ExportArgs {
    pub fn to_request(&self) -> StageRequest {
        StageRequest::new(Stage::Export)
            .option("--preset", self.preset.as_deref())
            .option("--quality", Some(self.quality.as_str()))
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("clipmate").chain(args.iter().copied())).unwrap()
    }

    fn stage_request(command: &Commands) -> Option<StageRequest> {
        match command {
            Commands::Import(args) => Some(args.to_request()),
            Commands::Detect(args) => Some(args.to_request()),
            Commands::Cut(args) => Some(args.to_request()),
            Commands::Merge(args) => Some(args.to_request()),
            Commands::Transcribe(args) => Some(args.to_request()),
            Commands::Subtitle(args) => Some(args.to_request()),
            Commands::Export(args) => Some(args.to_request()),
            Commands::Init(_) | Commands::Completions(_) => None,
        }
    }

    fn request_args(args: &[&str]) -> Vec<String> {
        stage_request(&parse(args).command).unwrap().args
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_passes_video() {
        assert_eq!(request_args(&["import", "talk.mp4"]), ["talk.mp4"]);
        assert!(request_args(&["import"]).is_empty());
    }

    #[test]
    fn detect_passes_preset() {
        assert_eq!(
            request_args(&["detect", "--preset", "teaching"]),
            ["--preset", "teaching"]
        );
        assert!(request_args(&["detect"]).is_empty());
    }

    #[test]
    fn cut_flags_keep_order() {
        assert_eq!(
            request_args(&["cut", "--interactive", "--auto"]),
            ["--auto", "--interactive"]
        );
        assert_eq!(request_args(&["cut", "--interactive"]), ["--interactive"]);
    }

    #[test]
    fn merge_has_no_args() {
        assert!(request_args(&["merge"]).is_empty());
    }

    #[test]
    fn transcribe_defaults_lang() {
        assert_eq!(request_args(&["transcribe"]), ["--lang", "zh"]);
        assert_eq!(
            request_args(&["transcribe", "--lang", "en", "--model", "paraformer"]),
            ["--model", "paraformer", "--lang", "en"]
        );
    }

    #[test]
    fn subtitle_burn_then_style() {
        assert_eq!(
            request_args(&["subtitle", "--style", "bold", "--burn"]),
            ["--burn", "--style", "bold"]
        );
    }

    #[test]
    fn export_defaults_quality() {
        assert_eq!(request_args(&["export"]), ["--quality", "high"]);
        assert_eq!(
            request_args(&["export", "--quality", "low", "--preset", "youtube"]),
            ["--preset", "youtube", "--quality", "low"]
        );
    }

    #[test]
    fn stage_request_names_stage() {
        let request = stage_request(&parse(&["subtitle"]).command).unwrap();
        assert_eq!(request.stage, Stage::Subtitle);
    }

    #[test]
    fn init_and_completions_are_not_stages() {
        assert!(stage_request(&parse(&["init", "demo"]).command).is_none());
        assert!(stage_request(&parse(&["completions", "bash"]).command).is_none());
    }

    #[test]
    fn init_parses_options() {
        let cli = parse(&["init", "--here", "--ai", "cursor", "--script-type", "ps"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.here);
                assert_eq!(args.ai.as_deref(), Some("cursor"));
                assert!(args.name.is_none());
            }
            other => panic!("expected init, got {:?}", other),
        }
        assert_eq!(cli.script_type, Some(ScriptType::PowerShell));
    }

    #[test]
    fn script_type_rejects_unknown_value() {
        let result = Cli::try_parse_from(["clipmate", "--script-type", "fish", "merge"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["merge", "--verbose", "--project", "/tmp/demo"]);
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/demo")));
        assert_eq!(cli.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn quiet_output_mode() {
        assert_eq!(parse(&["-q", "merge"]).output_mode(), OutputMode::Quiet);
        assert_eq!(parse(&["merge"]).output_mode(), OutputMode::Normal);
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["clipmate"]).is_err());
    }
}
