//! Stage result documents and their interpretation.
//!
//! A stage script reports its outcome by printing one JSON object on
//! stdout:
//!
//! ```text
//! { "status": "success" | "error", "project_name"?: string, "message"?: string, ... }
//! ```
//!
//! Anything besides `status`, `project_name` and `message` is stage-specific
//! and kept as-is in [`StageResult::fields`].

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Message used when a failed result does not explain itself.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Maximum number of characters of raw output kept for diagnostics.
pub const EXCERPT_LIMIT: usize = 500;

/// Status tag reported by a stage script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Success,
    Error,
}

impl StageStatus {
    /// Wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Success => "success",
            StageStatus::Error => "error",
        }
    }
}

/// Parsed outcome of one stage script run.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    pub status: StageStatus,
    pub project_name: Option<String>,
    pub message: Option<String>,
    /// Stage-specific fields, in the order the script printed them.
    pub fields: Map<String, Value>,
}

impl StageResult {
    /// Build a result from a parsed JSON object.
    ///
    /// A missing or unrecognized `status` is treated as an error. Non-string
    /// `project_name`/`message` values are kept in `fields` untouched.
    pub fn from_document(mut document: Map<String, Value>) -> Self {
        let status = match document.shift_remove("status") {
            Some(Value::String(tag)) if tag == "success" => StageStatus::Success,
            Some(Value::String(tag)) if tag == "error" => StageStatus::Error,
            Some(other) => {
                tracing::debug!("Unrecognized status {} treated as error", other);
                StageStatus::Error
            }
            None => {
                tracing::debug!("Result document has no status, treating as error");
                StageStatus::Error
            }
        };

        let project_name = take_string(&mut document, "project_name");
        let message = take_string(&mut document, "message");

        Self {
            status,
            project_name,
            message,
            fields: document,
        }
    }

    /// Whether the script reported success.
    pub fn is_success(&self) -> bool {
        self.status == StageStatus::Success
    }

    /// The error message to show the user, defaulting to [`UNKNOWN_ERROR`].
    pub fn error_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNKNOWN_ERROR)
    }

    /// Pretty JSON rendering of the full result.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn take_string(document: &mut Map<String, Value>, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Value::String(_)) => match document.shift_remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

impl Serialize for StageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1
            + usize::from(self.project_name.is_some())
            + usize::from(self.message.is_some())
            + self.fields.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("status", self.status.as_str())?;
        if let Some(name) = &self.project_name {
            map.serialize_entry("project_name", name)?;
        }
        if let Some(message) = &self.message {
            map.serialize_entry("message", message)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Classification of a script's captured stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// The script reported `status: success`.
    Success(StageResult),
    /// The script reported an error, or no recognizable status.
    Error { message: String, result: StageResult },
    /// No JSON object could be located in the output.
    Malformed { excerpt: String },
}

/// Interpret captured stdout as a stage result.
pub fn interpret(raw: &str) -> StageOutcome {
    match locate_document(raw) {
        Some(document) => {
            let result = StageResult::from_document(document);
            if result.is_success() {
                StageOutcome::Success(result)
            } else {
                StageOutcome::Error {
                    message: result.error_message().to_string(),
                    result,
                }
            }
        }
        None => StageOutcome::Malformed {
            excerpt: excerpt(raw),
        },
    }
}

/// Find the result document in captured output.
///
/// Tries the whole output first, then every line that starts with `{`,
/// from the last one backwards, accepting the first JSON object that runs
/// to the end of the output. This tolerates log lines printed before a
/// (possibly pretty-printed) document.
pub fn locate_document(raw: &str) -> Option<Map<String, Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Some(map);
    }

    let mut line_starts = Vec::new();
    let mut offset = 0;
    for line in trimmed.split_inclusive('\n') {
        if line.trim_start().starts_with('{') {
            line_starts.push(offset);
        }
        offset += line.len();
    }

    line_starts
        .into_iter()
        .rev()
        .find_map(|start| match serde_json::from_str::<Value>(&trimmed[start..]) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

/// First [`EXCERPT_LIMIT`] characters of `raw`, marking truncation.
pub fn excerpt(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn success_document_is_success() {
        let outcome = interpret(r#"{"status":"success","project_name":"demo"}"#);
        match outcome {
            StageOutcome::Success(result) => {
                assert_eq!(result.project_name.as_deref(), Some("demo"));
                assert!(result.fields.is_empty());
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn error_document_keeps_message_verbatim() {
        let outcome = interpret(r#"{"status":"error","message":"No video imported yet"}"#);
        match outcome {
            StageOutcome::Error { message, .. } => assert_eq!(message, "No video imported yet"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn error_without_message_uses_default() {
        let outcome = interpret(r#"{"status":"error"}"#);
        assert!(matches!(
            outcome,
            StageOutcome::Error { ref message, .. } if message == UNKNOWN_ERROR
        ));
    }

    #[test]
    fn missing_status_is_error() {
        let outcome = interpret(r#"{"project_name":"demo","clips":3}"#);
        match outcome {
            StageOutcome::Error { message, result } => {
                assert_eq!(message, UNKNOWN_ERROR);
                assert_eq!(result.status, StageStatus::Error);
                assert_eq!(result.fields["clips"], 3);
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn unrecognized_status_is_error() {
        let outcome = interpret(r#"{"status":"done","message":"odd"}"#);
        assert!(matches!(
            outcome,
            StageOutcome::Error { ref message, .. } if message == "odd"
        ));
    }

    #[test]
    fn non_json_is_malformed_with_excerpt() {
        let outcome = interpret("not json");
        assert_eq!(
            outcome,
            StageOutcome::Malformed {
                excerpt: "not json".to_string()
            }
        );
    }

    #[test]
    fn empty_output_is_malformed() {
        assert!(matches!(interpret("  \n"), StageOutcome::Malformed { .. }));
    }

    #[test]
    fn json_array_is_malformed() {
        assert!(matches!(
            interpret(r#"[{"status":"success"}]"#),
            StageOutcome::Malformed { .. }
        ));
    }

    #[test]
    fn locates_pretty_document_after_log_lines() {
        let raw = "Analyzing video...\nDone.\n{\n  \"status\": \"success\",\n  \"project_name\": \"demo\",\n  \"segments\": [\n    {\"start\": 1.5}\n  ]\n}\n";
        let outcome = interpret(raw);
        match outcome {
            StageOutcome::Success(result) => {
                assert_eq!(result.project_name.as_deref(), Some("demo"));
                assert_eq!(result.fields["segments"][0]["start"], 1.5);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn last_document_wins() {
        let raw = "{\"status\":\"error\",\"message\":\"first\"}\n{\"status\":\"success\",\"project_name\":\"demo\"}";
        assert!(matches!(interpret(raw), StageOutcome::Success(_)));
    }

    #[test]
    fn trailing_garbage_is_malformed() {
        let raw = "{\"status\":\"success\"}\ntrailing log line";
        assert!(matches!(interpret(raw), StageOutcome::Malformed { .. }));
    }

    #[test]
    fn non_string_message_stays_in_fields() {
        let result = StageResult::from_document(doc(json!({
            "status": "error",
            "message": {"code": 7}
        })));
        assert!(result.message.is_none());
        assert_eq!(result.fields["message"]["code"], 7);
        assert_eq!(result.error_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn serializes_status_first_and_keeps_field_order() {
        let result = StageResult::from_document(doc(json!({
            "duration": 12.5,
            "status": "success",
            "project_name": "demo",
            "output": "clips/out.mp4"
        })));
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"status":"success","project_name":"demo","duration":12.5,"output":"clips/out.mp4"}"#
        );
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let raw = "视".repeat(EXCERPT_LIMIT + 20);
        let cut = excerpt(&raw);
        assert_eq!(cut.chars().count(), EXCERPT_LIMIT + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn excerpt_keeps_short_output() {
        assert_eq!(excerpt("  short\n"), "short");
    }
}
