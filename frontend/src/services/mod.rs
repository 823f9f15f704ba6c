//! Backend communication services.
//!
//! This module provides services for external communication:
//!
//! # Services
//!
//! - [`transform`] - learn/preview/apply against the transformation service
//! - [`mysql`] - MySQL browse + apply adapter
//! - [`mongo`] - MongoDB browse + apply adapter
//! - [`auth`] - signup/login and durable session flag
//! - [`reply`] - content-type discrimination for dual-mode replies
//! - [`download`] - object URLs and browser downloads

pub mod auth;
pub mod download;
pub mod mongo;
pub mod mysql;
pub mod reply;
pub mod transform;

pub use auth::*;
pub use download::*;
pub use mongo::*;
pub use mysql::*;
pub use reply::*;
pub use transform::*;

use gloo_net::http::Response;

use crate::types::AppError;

/// Turn a non-2xx response into an [`AppError::Remote`], preferring the
/// service's own `{"error": ...}` body over the per-action fallback.
pub(crate) async fn remote_error(response: Response, fallback: &str) -> AppError {
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    };
    AppError::Remote(message)
}
