//! Command documentation templates.
//!
//! A template is a markdown file that may start with a YAML header between
//! two `---` lines:
//!
//! ```text
//! ---
//! description: Detect silence and scene changes
//! ---
//! # /detect
//! ...
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ClipmateError, Result};

/// Header delimiter line.
pub const DELIMITER: &str = "---";

/// A loaded documentation artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandTemplate {
    /// Header keys and values.
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    /// Text after the header.
    pub content: String,
}

/// Load a template from disk.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_template(path: &Path) -> Result<Option<CommandTemplate>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No template at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(ClipmateError::Io(e)),
    };

    parse_template(&text, path).map(Some)
}

/// Split template text into header metadata and body.
///
/// Text without an opening and a closing delimiter line is all body.
pub fn parse_template(text: &str, source_path: &Path) -> Result<CommandTemplate> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some((header, body)) = split_header(text) else {
        return Ok(CommandTemplate {
            metadata: BTreeMap::new(),
            content: text.to_string(),
        });
    };

    let metadata = parse_metadata(header).map_err(|message| ClipmateError::TemplateParseError {
        path: source_path.to_path_buf(),
        message,
    })?;

    Ok(CommandTemplate {
        metadata,
        content: body.to_string(),
    })
}

fn split_header(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

fn parse_metadata(header: &str) -> std::result::Result<BTreeMap<String, serde_yaml::Value>, String> {
    if header.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(header).map_err(|e| e.to_string())?;
    match value {
        serde_yaml::Value::Null => Ok(BTreeMap::new()),
        serde_yaml::Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| match key {
                serde_yaml::Value::String(key) => Ok((key, value)),
                serde_yaml::Value::Number(n) => Ok((n.to_string(), value)),
                serde_yaml::Value::Bool(b) => Ok((b.to_string(), value)),
                other => Err(format!("unsupported header key: {:?}", other)),
            })
            .collect(),
        _ => Err("header must be a mapping of keys to values".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(text: &str) -> CommandTemplate {
        parse_template(text, Path::new("test.md")).unwrap()
    }

    #[test]
    fn splits_header_and_body() {
        let template = parse("---\ndescription: Detect silence\nargs: 2\n---\n# Detect\n\nBody text\n");
        assert_eq!(template.metadata["description"].as_str(), Some("Detect silence"));
        assert_eq!(template.metadata["args"].as_i64(), Some(2));
        assert_eq!(template.content, "# Detect\n\nBody text\n");
    }

    #[test]
    fn no_delimiter_is_all_body() {
        let template = parse("# Just markdown\n---\nmore\n");
        assert!(template.metadata.is_empty());
        assert_eq!(template.content, "# Just markdown\n---\nmore\n");
    }

    #[test]
    fn unclosed_header_is_all_body() {
        let template = parse("---\ndescription: open\n# Body\n");
        assert!(template.metadata.is_empty());
        assert_eq!(template.content, "---\ndescription: open\n# Body\n");
    }

    #[test]
    fn empty_header_gives_empty_metadata() {
        let template = parse("---\n---\nBody");
        assert!(template.metadata.is_empty());
        assert_eq!(template.content, "Body");
    }

    #[test]
    fn handles_crlf_and_bom() {
        let template = parse("\u{feff}---\r\ntitle: Cut\r\n---\r\nBody\r\n");
        assert_eq!(template.metadata["title"].as_str(), Some("Cut"));
        assert_eq!(template.content, "Body\r\n");
    }

    #[test]
    fn non_mapping_header_is_error() {
        let result = parse_template("---\n- a\n- b\n---\nBody", Path::new("bad.md"));
        assert!(matches!(
            result,
            Err(ClipmateError::TemplateParseError { .. })
        ));
    }

    #[test]
    fn missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let result = load_template(&temp.path().join("missing.md")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn loading_twice_is_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.md");
        fs::write(&path, "---\ndescription: Export\n---\nExport the video\n").unwrap();

        let first = load_template(&path).unwrap();
        let second = load_template(&path).unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\ndescription: Export\n---\nExport the video\n"
        );
    }
}
