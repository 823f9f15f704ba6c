//! HTTP client for the external transformation service.
//!
//! All three endpoints take multipart form data. The training table is
//! never cached server-side: every call re-sends the merged `source,target`
//! CSV built from the current file and column selections.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use super::{csv_blob, read_file_text, remote_error};
use crate::config::TRANSFORM_URL;
use crate::csv::{merge, Dataset};
use crate::session::{ArtifactKind, TransformArtifact};
use crate::types::{AppError, ApplyPreview};

/// Re-build the `source,target` training table from the current file and
/// column selections. Called before every learn and apply: the table is
/// never cached.
pub async fn build_training_csv(
    source_file: &File,
    target_file: &File,
    source_col: &str,
    target_col: &str,
) -> Result<String, AppError> {
    let source = Dataset::parse(&read_file_text(source_file).await?);
    let target = Dataset::parse(&read_file_text(target_file).await?);
    let training = merge(&source, source_col, &target, target_col)?;
    Ok(training.to_csv())
}

/// Send the training table to `POST /preview-transform` and learn a
/// transformation.
pub async fn learn(train_csv: &str) -> Result<TransformArtifact, AppError> {
    let form = train_form(train_csv)?;

    let url = format!("{}/preview-transform", TRANSFORM_URL);
    let response = Request::post(&url)
        .body(form)
        .map_err(|e| AppError::Remote(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error generating preview").await);
    }

    response
        .json::<TransformArtifact>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))
}

/// Preview the learned transformation on an apply file without mutating
/// it: `POST /preview-apply`.
pub async fn preview_apply(
    train_csv: &str,
    apply_file: &File,
    artifact: &TransformArtifact,
) -> Result<ApplyPreview, AppError> {
    let form = apply_form(train_csv, apply_file, artifact)?;

    let url = format!("{}/preview-apply", TRANSFORM_URL);
    let response = Request::post(&url)
        .body(form)
        .map_err(|e| AppError::Remote(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error generating apply preview").await);
    }

    response
        .json::<ApplyPreview>()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to parse response: {}", e)))
}

/// Fully transform the apply file: `POST /transform`, returning the
/// binary CSV stream for download.
pub async fn apply(
    train_csv: &str,
    apply_file: &File,
    artifact: &TransformArtifact,
) -> Result<Vec<u8>, AppError> {
    let form = apply_form(train_csv, apply_file, artifact)?;

    let url = format!("{}/transform", TRANSFORM_URL);
    let response = Request::post(&url)
        .body(form)
        .map_err(|e| AppError::Remote(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Remote(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        return Err(remote_error(response, "Error applying transformation").await);
    }

    response
        .binary()
        .await
        .map_err(|e| AppError::Remote(format!("Failed to read response: {}", e)))
}

/// Multipart body carrying only the training table.
fn train_form(train_csv: &str) -> Result<FormData, AppError> {
    let form = FormData::new()
        .map_err(|e| AppError::Remote(format!("Failed to create FormData: {:?}", e)))?;

    let blob = csv_blob(train_csv)?;
    form.append_with_blob_and_filename("train_file", &blob, "train.csv")
        .map_err(|e| AppError::Remote(format!("Failed to append file: {:?}", e)))?;

    Ok(form)
}

/// Multipart body for the two apply endpoints: training table, apply
/// file, classification label, and the approved function source for LLM
/// artifacts.
fn apply_form(
    train_csv: &str,
    apply_file: &File,
    artifact: &TransformArtifact,
) -> Result<FormData, AppError> {
    let form = train_form(train_csv)?;

    form.append_with_blob("test_file", apply_file)
        .map_err(|e| AppError::Remote(format!("Failed to append file: {:?}", e)))?;
    form.append_with_str("transformation_type", &artifact.transformation_type)
        .map_err(|e| AppError::Remote(format!("Failed to append field: {:?}", e)))?;

    if artifact.kind == ArtifactKind::Llm {
        form.append_with_str("approved_function", &artifact.description)
            .map_err(|e| AppError::Remote(format!("Failed to append field: {:?}", e)))?;
    }

    Ok(form)
}
