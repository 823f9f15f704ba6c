//! MySQL browse + apply adapter.
//!
//! A strict drill-down over the service's `/api/mysql/*` endpoints:
//! connect -> databases -> tables -> columns -> preview -> apply. The
//! apply endpoint replies in one of two representations (JSON preview or
//! raw CSV stream); see [`super::reply`] for the discrimination.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use super::{binary_table_preview, classify_reply, object_url, remote_error, ServiceReply};
use crate::config::{BINARY_PREVIEW_ROWS, TRANSFORM_URL};
use crate::session::ArtifactPayload;
use crate::types::{AppError, DownloadHandle, TablePreview};

#[derive(Debug, Serialize)]
struct ConnectionRequest<'a> {
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct DatabasesResponse {
    databases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TablesResponse {
    tables: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ColumnsResponse {
    columns: Vec<String>,
}

/// Outcome of the apply-and-store call, normalized from either reply
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub struct MysqlApplyOutcome {
    /// Bounded on-screen preview of the transformed table.
    pub preview: TablePreview,
    /// Full transformed CSV, present only for binary replies.
    pub download: Option<DownloadHandle>,
}

/// List databases reachable with the given connection secret.
pub async fn databases(password: &str) -> Result<Vec<String>, AppError> {
    let body = ConnectionRequest { password, database: None, table: None };
    let response = post_json("/api/mysql/databases", &body, "Error connecting to MySQL").await?;
    Ok(response.json::<DatabasesResponse>().await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .databases)
}

/// List tables in a database.
pub async fn tables(password: &str, database: &str) -> Result<Vec<String>, AppError> {
    let body = ConnectionRequest { password, database: Some(database), table: None };
    let response = post_json("/api/mysql/tables", &body, "Error fetching tables").await?;
    Ok(response.json::<TablesResponse>().await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .tables)
}

/// List columns of a table.
pub async fn columns(password: &str, database: &str, table: &str) -> Result<Vec<String>, AppError> {
    let body = ConnectionRequest { password, database: Some(database), table: Some(table) };
    let response = post_json("/api/mysql/columns", &body, "Error fetching columns").await?;
    Ok(response.json::<ColumnsResponse>().await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .columns)
}

/// Fetch a bounded preview of a table.
pub async fn preview_table(
    password: &str,
    database: &str,
    table: &str,
) -> Result<TablePreview, AppError> {
    let body = ConnectionRequest { password, database: Some(database), table: Some(table) };
    let response = post_json("/api/mysql/preview_table", &body, "Error fetching table preview").await?;
    response.json::<TablePreview>().await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))
}

/// Apply the current transformation to a table column and store the
/// result. The service replies with either a JSON preview or a raw CSV
/// stream; the binary branch keeps at most [`BINARY_PREVIEW_ROWS`] rows
/// on screen and retains the full bytes behind a download handle.
pub async fn apply_and_store(
    password: &str,
    database: &str,
    table: &str,
    column: &str,
    artifact: &ArtifactPayload,
) -> Result<MysqlApplyOutcome, AppError> {
    let body = serde_json::json!({
        "password": password,
        "database": database,
        "table": table,
        "column": column,
        "transformation_type": artifact.transformation_type,
        "function_code": artifact.function_code,
        "func_name": artifact.func_name,
        "params": artifact.params,
    });

    let response = post_json(
        "/api/mysql/apply_transformation_and_store",
        &body,
        "Error applying transformation to database",
    )
    .await?;

    let content_type = response.headers().get("content-type");
    let bytes = response
        .binary()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to read response: {}", e)))?;

    match classify_reply(content_type.as_deref(), bytes) {
        ServiceReply::Json(value) => {
            let preview: TablePreview = serde_json::from_value(value)
                .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?;
            Ok(MysqlApplyOutcome { preview, download: None })
        }
        ServiceReply::Binary(bytes) => {
            let preview = binary_table_preview(&bytes, BINARY_PREVIEW_ROWS);
            let url = object_url(&bytes, "text/csv")?;
            Ok(MysqlApplyOutcome {
                preview,
                download: Some(DownloadHandle {
                    url,
                    filename: format!("{}_transformed.csv", table),
                }),
            })
        }
    }
}

/// POST a JSON body to a MySQL adapter endpoint, mapping non-2xx replies
/// to [`AppError::Remote`] with the given fallback message.
async fn post_json<T: Serialize>(
    path: &str,
    body: &T,
    fallback: &str,
) -> Result<gloo_net::http::Response, AppError> {
    let url = format!("{}{}", TRANSFORM_URL, path);
    let response = Request::post(&url)
        .json(body)
        .map_err(|e| AppError::Remote(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, fallback).await);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_request_skips_absent_levels() {
        let body = ConnectionRequest { password: "pw", database: None, table: None };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"password": "pw"}));
    }

    #[test]
    fn test_list_responses_deserialize() {
        let dbs: DatabasesResponse =
            serde_json::from_str(r#"{"databases": ["shop", "crm"]}"#).unwrap();
        assert_eq!(dbs.databases.len(), 2);

        let tables: TablesResponse = serde_json::from_str(r#"{"tables": ["orders"]}"#).unwrap();
        assert_eq!(tables.tables, vec!["orders"]);

        let cols: ColumnsResponse = serde_json::from_str(r#"{"columns": ["id"]}"#).unwrap();
        assert_eq!(cols.columns, vec!["id"]);
    }

    #[test]
    fn test_apply_body_carries_full_artifact_descriptor() {
        let artifact = ArtifactPayload {
            transformation_type: "String-based".into(),
            function_code: "def transform(x): return x".into(),
            func_name: String::new(),
            params: Vec::new(),
        };
        let body = serde_json::json!({
            "password": "pw",
            "database": "shop",
            "table": "orders",
            "column": "total",
            "transformation_type": artifact.transformation_type,
            "function_code": artifact.function_code,
            "func_name": artifact.func_name,
            "params": artifact.params,
        });
        assert_eq!(body["function_code"], "def transform(x): return x");
        assert_eq!(body["func_name"], "");
        assert_eq!(body["params"], serde_json::json!([]));
    }
}
