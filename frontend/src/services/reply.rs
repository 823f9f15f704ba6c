//! Content-type discrimination for the MySQL apply endpoint.
//!
//! The service chooses its representation based on result size/shape and
//! replies with either a JSON preview object or a raw CSV byte stream.
//! The decision is made once here, at the boundary; downstream preview
//! logic operates on one normalized shape and never inspects headers.

use serde_json::Value;

use crate::csv::Dataset;
use crate::types::TablePreview;

/// A service reply, already discriminated by declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    /// Small/bounded result: a JSON preview object.
    Json(Value),
    /// Large result: a raw CSV byte stream.
    Binary(Vec<u8>),
}

/// Classify a reply from its declared content type.
///
/// Anything declaring JSON that actually parses is [`ServiceReply::Json`];
/// everything else is treated as a binary CSV stream.
pub fn classify_reply(content_type: Option<&str>, bytes: Vec<u8>) -> ServiceReply {
    let declares_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if declares_json {
        if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
            return ServiceReply::Json(value);
        }
    }

    ServiceReply::Binary(bytes)
}

/// Build an on-screen preview from a binary CSV reply: the header row
/// plus at most `limit` data rows. The full byte stream stays with the
/// caller as the downloadable artifact.
pub fn binary_table_preview(bytes: &[u8], limit: usize) -> TablePreview {
    let text = String::from_utf8_lossy(bytes);
    let dataset = Dataset::parse(&text);

    let data = dataset
        .rows
        .iter()
        .take(limit)
        .map(|row| {
            row.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect()
        })
        .collect();

    TablePreview {
        headers: dataset.headers,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_content_type_parses_json() {
        let body = br#"{"headers": ["a"], "data": [{"a": "1"}]}"#.to_vec();
        let reply = classify_reply(Some("application/json"), body);
        match reply {
            ServiceReply::Json(value) => assert_eq!(value["headers"], json!(["a"])),
            ServiceReply::Binary(_) => panic!("expected JSON reply"),
        }
    }

    #[test]
    fn test_json_content_type_with_charset() {
        let body = br#"{"ok": true}"#.to_vec();
        let reply = classify_reply(Some("application/json; charset=utf-8"), body);
        assert!(matches!(reply, ServiceReply::Json(_)));
    }

    #[test]
    fn test_csv_content_type_is_binary() {
        let body = b"a,b\n1,2\n".to_vec();
        let reply = classify_reply(Some("text/csv"), body.clone());
        assert_eq!(reply, ServiceReply::Binary(body));
    }

    #[test]
    fn test_missing_content_type_is_binary() {
        let body = b"a,b\n1,2\n".to_vec();
        assert!(matches!(classify_reply(None, body), ServiceReply::Binary(_)));
    }

    #[test]
    fn test_declared_json_that_fails_to_parse_falls_back_to_binary() {
        let body = b"not json at all".to_vec();
        assert!(matches!(
            classify_reply(Some("application/json"), body),
            ServiceReply::Binary(_)
        ));
    }

    #[test]
    fn test_binary_preview_caps_rows() {
        let body = b"a,b\n1,2\n3,4\n5,6\n7,8\n9,10\n11,12\n13,14";
        let preview = binary_table_preview(body, 5);

        assert_eq!(preview.headers, vec!["a", "b"]);
        assert_eq!(preview.data.len(), 5);
        assert_eq!(preview.cell(0, "a"), "1");
        assert_eq!(preview.cell(4, "b"), "10");
    }

    #[test]
    fn test_binary_preview_shorter_than_cap() {
        let preview = binary_table_preview(b"a,b\n1,2", 5);
        assert_eq!(preview.data.len(), 1);
    }
}
