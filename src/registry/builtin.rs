//! Command templates embedded at compile time.

use include_dir::{include_dir, Dir, File};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A command template shipped with the binary.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplate {
    /// File name, e.g. `detect.md`.
    pub file_name: &'static str,
    /// Raw file contents.
    pub contents: &'static str,
}

impl BuiltinTemplate {
    fn from_file(file: &'static File<'static>) -> Option<Self> {
        let file_name = file.path().file_name()?.to_str()?;
        let contents = file.contents_utf8()?;
        Some(Self {
            file_name,
            contents,
        })
    }
}

/// All embedded command templates, sorted by file name.
pub fn command_templates() -> Vec<BuiltinTemplate> {
    let mut templates: Vec<_> = TEMPLATES_DIR
        .get_dir("commands")
        .map(|dir| {
            dir.files()
                .filter(|f| f.path().extension().is_some_and(|ext| ext == "md"))
                .filter_map(BuiltinTemplate::from_file)
                .collect()
        })
        .unwrap_or_default();
    templates.sort_by_key(|t| t.file_name);
    templates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::parse_template;
    use crate::stage::Stage;
    use std::path::Path;

    fn find(stage: Stage) -> Option<BuiltinTemplate> {
        let file_name = format!("{}.md", stage.name());
        command_templates()
            .into_iter()
            .find(|t| t.file_name == file_name)
    }

    #[test]
    fn every_stage_has_a_template() {
        for stage in Stage::all() {
            assert!(find(stage).is_some(), "missing template for {}", stage);
        }
    }

    #[test]
    fn only_stage_templates_are_embedded() {
        assert_eq!(command_templates().len(), Stage::all().count());
    }

    #[test]
    fn templates_parse_with_description() {
        for template in command_templates() {
            let parsed = parse_template(template.contents, Path::new(template.file_name)).unwrap();
            assert!(parsed.metadata["description"].as_str().is_some());
            assert!(parsed.content.contains('#'));
        }
    }

    #[test]
    fn template_names_match_stage() {
        let detect = find(Stage::Detect).unwrap();
        assert_eq!(detect.file_name, "detect.md");
        assert!(detect.contents.contains("scripts/bash/detect.sh"));
    }
}
