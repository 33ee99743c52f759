//! Body edit rule.
//!
//! Text returned by the external editor is stored verbatim unless it looks
//! like JSON (first non-whitespace char is `{` or `[`). JSON-looking text must
//! parse and is stored pretty-printed with key order preserved.

use serde_json::Value;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyEdit {
    /// Stored as typed.
    Plain(String),
    /// Parsed and pretty-printed.
    Json(String),
}

impl BodyEdit {
    pub fn into_text(self) -> String {
        match self {
            BodyEdit::Plain(text) | BodyEdit::Json(text) => text,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, BodyEdit::Json(_))
    }
}

/// True when the first non-whitespace character opens an object or array.
pub fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{') | Some('['))
}

/// Apply the body edit rule. A JSON parse failure rejects the whole edit.
pub fn apply_body_edit(edited: &str) -> Result<BodyEdit, ValidationError> {
    if !looks_like_json(edited) {
        return Ok(BodyEdit::Plain(edited.to_string()));
    }

    let value: Value = serde_json::from_str(edited).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;
    let pretty = serde_json::to_string_pretty(&value).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;
    Ok(BodyEdit::Json(pretty))
}
