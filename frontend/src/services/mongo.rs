//! MongoDB browse + apply adapter.
//!
//! Mirrors the MySQL adapter without a credential step: the service owns
//! the connection. Apply always replies with a JSON preview; the service
//! is responsible for persisting the transformed collection.

use gloo_net::http::Request;
use serde::Deserialize;

use super::remote_error;
use crate::config::TRANSFORM_URL;
use crate::session::ArtifactPayload;
use crate::types::{AppError, TablePreview};

#[derive(Debug, Deserialize)]
struct DatabasesResponse {
    databases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    collections: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApplyResponse {
    preview: TablePreview,
}

/// List databases on the pre-configured connection.
pub async fn databases() -> Result<Vec<String>, AppError> {
    let url = format!("{}/api/mongo/databases", TRANSFORM_URL);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error fetching MongoDB databases").await);
    }

    Ok(response
        .json::<DatabasesResponse>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .databases)
}

/// List collections in a database.
pub async fn collections(database: &str) -> Result<Vec<String>, AppError> {
    let url = format!("{}/api/mongo/collections", TRANSFORM_URL);
    let response = Request::get(&url)
        .query([("database", database)])
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error fetching collections").await);
    }

    Ok(response
        .json::<CollectionsResponse>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .collections)
}

/// Fetch a bounded preview of a collection (headers + rows).
pub async fn preview(database: &str, collection: &str) -> Result<TablePreview, AppError> {
    let url = format!("{}/api/mongo/preview", TRANSFORM_URL);
    let response = Request::get(&url)
        .query([("database", database), ("collection", collection)])
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error fetching collection preview").await);
    }

    response
        .json::<TablePreview>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))
}

/// Apply the current transformation to a collection column. The service
/// persists the result and replies with a JSON preview and a success
/// flag; there is no binary branch here.
pub async fn apply(
    database: &str,
    collection: &str,
    column: &str,
    artifact: &ArtifactPayload,
) -> Result<TablePreview, AppError> {
    let body = serde_json::json!({
        "database": database,
        "collection": collection,
        "column": column,
        "transformation_type": artifact.transformation_type,
        "function_code": artifact.function_code,
        "func_name": artifact.func_name,
        "params": artifact.params,
    });

    let url = format!("{}/api/mongo/apply_transformation", TRANSFORM_URL);
    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| AppError::Remote(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error applying transformation to MongoDB").await);
    }

    Ok(response
        .json::<ApplyResponse>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))?
        .preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_response_deserialization() {
        let json = r#"{
            "preview": {
                "headers": ["_id", "name"],
                "data": [{"_id": "abc123", "name": "ALICE"}]
            }
        }"#;
        let response: ApplyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.preview.headers, vec!["_id", "name"]);
        assert_eq!(response.preview.cell(0, "name"), "ALICE");
    }

    #[test]
    fn test_list_responses_deserialize() {
        let dbs: DatabasesResponse =
            serde_json::from_str(r#"{"databases": ["inventory"]}"#).unwrap();
        assert_eq!(dbs.databases, vec!["inventory"]);

        let cols: CollectionsResponse =
            serde_json::from_str(r#"{"collections": ["items", "orders"]}"#).unwrap();
        assert_eq!(cols.collections.len(), 2);
    }
}
