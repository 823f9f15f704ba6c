//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Preview Types** - tabular previews from the DB adapters
//! - **Apply Types** - file-apply preview structures
//! - **Download Types** - browser download handles
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Preview Types
// =============================================================================

/// A bounded tabular preview: headers plus row objects.
///
/// This is the shape returned by `preview_table`, the Mongo `preview`
/// endpoint, and both apply responses. Cell values may be strings or
/// numbers on the wire; [`TablePreview::cell`] renders either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub headers: Vec<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, Value>>,
}

impl TablePreview {
    /// Render the cell at `row[header]` for display. Missing cells and
    /// nulls render empty.
    pub fn cell(&self, row: usize, header: &str) -> String {
        match self.data.get(row).and_then(|r| r.get(header)) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

// =============================================================================
// Apply Types
// =============================================================================

/// One predicted row from `POST /preview-apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyExample {
    pub input: String,
    pub predicted: String,
}

/// Response of `POST /preview-apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyPreview {
    pub examples: Vec<ApplyExample>,
}

// =============================================================================
// Download Types
// =============================================================================

/// A browser download handle for a binary result: an object URL plus the
/// suggested file name. Plain data; the URL is minted at the service
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadHandle {
    pub url: String,
    pub filename: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Every failure is surfaced in step-local error state; nothing is thrown
/// past the UI and nothing is automatically retried.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// Missing required selection/file or row-count mismatch; caught
    /// before any network call.
    Validation(String),
    /// Apply blocked until the transformation is approved.
    ApprovalRequired(String),
    /// Non-2xx from the external service or DB adapters.
    Remote(String),
    /// Invalid credentials at login/signup.
    Auth(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::ApprovalRequired(msg) => write!(f, "{}", msg),
            AppError::Remote(msg) => write!(f, "{}", msg),
            AppError::Auth(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<crate::csv::RowCountMismatch> for AppError {
    fn from(e: crate::csv::RowCountMismatch) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<crate::session::ApprovalRequired> for AppError {
    fn from(e: crate::session::ApprovalRequired) -> Self {
        AppError::ApprovalRequired(e.to_string())
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_preview_deserialization() {
        let json = r#"{"headers": ["a", "b"], "data": [{"a": "1", "b": 2}]}"#;
        let preview: TablePreview = serde_json::from_str(json).unwrap();
        assert_eq!(preview.headers, vec!["a", "b"]);
        assert_eq!(preview.cell(0, "a"), "1");
        assert_eq!(preview.cell(0, "b"), "2");
    }

    #[test]
    fn test_cell_missing_and_null_render_empty() {
        let preview = TablePreview {
            headers: vec!["a".into()],
            data: vec![serde_json::Map::from_iter([("a".to_string(), json!(null))])],
        };
        assert_eq!(preview.cell(0, "a"), "");
        assert_eq!(preview.cell(0, "missing"), "");
        assert_eq!(preview.cell(9, "a"), "");
    }

    #[test]
    fn test_apply_preview_deserialization() {
        let json = r#"{"examples": [{"input": "alice", "predicted": "ALICE"}]}"#;
        let preview: ApplyPreview = serde_json::from_str(json).unwrap();
        assert_eq!(preview.examples[0].predicted, "ALICE");
    }

    #[test]
    fn test_error_display_is_user_facing_message() {
        let err = AppError::Validation("Please upload both files.".into());
        assert_eq!(err.to_string(), "Please upload both files.");
    }
}
