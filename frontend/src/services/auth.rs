//! Auth service client and durable session flag.
//!
//! Signup/login POST to the thin auth service. The authenticated flag and
//! username live in `localStorage` so a reload lands the user back in the
//! workbench; this is intentional, not an oversight.

use gloo_net::http::Request;
use serde_json::json;
use web_sys::Storage;

use crate::config::{AUTH_URL, STORAGE_AUTH_KEY, STORAGE_USERNAME_KEY};
use crate::types::AppError;

/// Create an account. Fails with [`AppError::Auth`] on duplicate
/// username or missing fields.
pub async fn signup(username: &str, password: &str) -> Result<(), AppError> {
    post_credentials("/api/signup", username, password, "Could not create account").await
}

/// Verify credentials. Unknown user and wrong password surface the same
/// message.
pub async fn login(username: &str, password: &str) -> Result<(), AppError> {
    post_credentials("/api/login", username, password, "Invalid credentials").await
}

async fn post_credentials(
    path: &str,
    username: &str,
    password: &str,
    fallback: &str,
) -> Result<(), AppError> {
    let url = format!("{}{}", AUTH_URL, path);
    let response = Request::post(&url)
        .json(&json!({ "username": username, "password": password }))
        .map_err(|e| AppError::Auth(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| AppError::Auth(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| {
                serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            })
            .unwrap_or_else(|| fallback.to_string());
        return Err(AppError::Auth(message));
    }

    Ok(())
}

// =============================================================================
// Durable session flag
// =============================================================================

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the stored session at startup: the username if the authenticated
/// flag is set.
pub fn load_session() -> Option<String> {
    let storage = local_storage()?;
    let flag = storage.get_item(STORAGE_AUTH_KEY).ok().flatten()?;
    if flag != "true" {
        return None;
    }
    storage
        .get_item(STORAGE_USERNAME_KEY)
        .ok()
        .flatten()
        .or(Some("User".to_string()))
}

/// Persist the session after a successful signup/login.
pub fn store_session(username: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(STORAGE_AUTH_KEY, "true");
        let _ = storage.set_item(STORAGE_USERNAME_KEY, username);
    }
}

/// Drop the session on logout.
pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_AUTH_KEY);
        let _ = storage.remove_item(STORAGE_USERNAME_KEY);
    }
}
