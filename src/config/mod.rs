//! Project configuration for ClipMate.
//!
//! - Schema definitions in [`schema`]
//! - Project discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use clipmate::config::{ProjectConfig, ProjectContext, ScriptType};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".clipmate")).unwrap();
//! fs::write(
//!     temp.path().join(".clipmate/config.json"),
//!     r#"{"name": "demo", "scriptType": "ps"}"#,
//! ).unwrap();
//!
//! let ctx = ProjectContext::discover(temp.path(), None).unwrap();
//! assert_eq!(ctx.script_type, ScriptType::PowerShell);
//! ```
//!
//! # Files
//!
//! - `.clipmate/config.json` - project name, assistant, script type
//! - `.clipmate/aliyun.json` - speech recognition credentials (external scripts only)

pub mod loader;
pub mod schema;

pub use loader::{
    config_path, find_project_root, load_project_config, parse_project_config, write_json,
    ProjectContext, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{
    AliyunConfig, AsrConfig, ProjectConfig, ScriptType, PROJECT_LAYOUT_VERSION, PROJECT_TYPE,
};
