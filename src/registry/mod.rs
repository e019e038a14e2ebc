//! Static catalogs used when scaffolding a project.
//!
//! - [`assistants`]: AI assistants and where they read slash commands
//! - [`builtin`]: the stage command templates embedded in the binary
//!
//! # Example
//!
//! ```
//! use clipmate::registry::{assistants, command_templates};
//!
//! let profile = assistants::find("gemini").unwrap();
//! assert_eq!(profile.commands_path(), ".gemini/commands");
//! assert!(!command_templates().is_empty());
//! ```

pub mod assistants;
pub mod builtin;

pub use assistants::{AssistantProfile, ASSISTANTS, DEFAULT_ASSISTANT};
pub use builtin::{command_templates, BuiltinTemplate};
