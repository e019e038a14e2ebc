//! Project discovery and configuration loading.

use crate::config::schema::{ProjectConfig, ScriptType};
use crate::error::{ClipmateError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project metadata.
pub const CONFIG_DIR: &str = ".clipmate";

/// Project config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Path of the project config for a given root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Find the project root by walking up from `start`.
///
/// The root is the first ancestor (including `start`) that contains
/// `.clipmate/config.json`. A relative `start` is resolved against the
/// current directory first.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = std::path::absolute(start).ok()?;

    loop {
        if config_path(&current).is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load `.clipmate/config.json` from a project root.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the JSON is invalid.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = config_path(project_root);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ClipmateError::ConfigNotFound { path: path.clone() }
        } else {
            ClipmateError::Io(e)
        }
    })?;

    parse_project_config(&content, &path)
}

/// Parse JSON content into a [`ProjectConfig`].
pub fn parse_project_config(content: &str, source_path: &Path) -> Result<ProjectConfig> {
    serde_json::from_str(content).map_err(|e| ClipmateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a value as pretty JSON (two-space indent, trailing newline).
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// The project a pipeline command operates on.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory scripts and templates are resolved against.
    pub root: PathBuf,
    /// Parsed config, if the root is an initialized project.
    pub config: Option<ProjectConfig>,
    /// Script flavor after applying overrides.
    pub script_type: ScriptType,
}

impl ProjectContext {
    /// Resolve the project for a start directory.
    ///
    /// Falls back to `start` itself with POSIX scripts when no project is
    /// found. An explicit `script_override` always wins over the config.
    pub fn discover(start: &Path, script_override: Option<ScriptType>) -> Result<Self> {
        let start = std::path::absolute(start)?;
        let (root, config) = match find_project_root(&start) {
            Some(root) => {
                let config = load_project_config(&root)?;
                (root, Some(config))
            }
            None => {
                tracing::debug!("No ClipMate project above {}", start.display());
                (start, None)
            }
        };

        let script_type = script_override
            .or_else(|| config.as_ref().map(|c| c.script_type))
            .unwrap_or_default();

        tracing::debug!(
            "Project root {} using {} scripts",
            root.display(),
            script_type
        );

        Ok(Self {
            root,
            config,
            script_type,
        })
    }

    /// Project name from config, if any.
    pub fn name(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, json: &str) {
        fs::create_dir_all(root.join(CONFIG_DIR)).unwrap();
        fs::write(config_path(root), json).unwrap();
    }

    #[test]
    fn find_project_root_in_start_dir() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"name": "demo"}"#);

        assert_eq!(find_project_root(temp.path()), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"name": "demo"}"#);
        let nested = temp.path().join("clips").join("raw");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_ignores_bare_config_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(temp.path()), None);
    }

    #[test]
    fn load_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_project_config(temp.path());
        assert!(matches!(result, Err(ClipmateError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_invalid_config_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "{ not json");
        let result = load_project_config(temp.path());
        assert!(matches!(result, Err(ClipmateError::ConfigParseError { .. })));
    }

    #[test]
    fn discover_reads_script_type() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"name": "demo", "scriptType": "ps"}"#);

        let ctx = ProjectContext::discover(temp.path(), None).unwrap();
        assert_eq!(ctx.script_type, ScriptType::PowerShell);
        assert_eq!(ctx.name(), Some("demo"));
    }

    #[test]
    fn discover_override_wins() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"name": "demo", "scriptType": "ps"}"#);

        let ctx = ProjectContext::discover(temp.path(), Some(ScriptType::Posix)).unwrap();
        assert_eq!(ctx.script_type, ScriptType::Posix);
    }

    #[test]
    fn discover_without_project_falls_back() {
        let temp = TempDir::new().unwrap();

        let ctx = ProjectContext::discover(temp.path(), None).unwrap();
        assert_eq!(ctx.root, temp.path());
        assert!(ctx.config.is_none());
        assert_eq!(ctx.script_type, ScriptType::Posix);
    }

    #[test]
    fn discover_resolves_relative_start() {
        let ctx = ProjectContext::discover(Path::new("."), None).unwrap();
        assert!(ctx.root.is_absolute());
    }

    #[test]
    fn find_project_root_from_parent_component() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{"name": "demo"}"#);
        let nested = temp.path().join("clips").join("day1");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested.join("..")).unwrap();
        assert!(config_path(&root).is_file());
    }

    #[test]
    fn write_json_is_pretty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        write_json(&path, &serde_json::json!({"a": 1})).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": 1\n}\n");
    }
}
