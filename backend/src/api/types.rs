//! REST API types for the auth endpoints.
//!
//! The wire format matches the original auth API: flat JSON bodies,
//! `{"success": true}` on success, `{"error": "..."}` on failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /api/signup` and `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Success response for both auth endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

impl AuthResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: CredentialsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_success_shape() {
        let json = serde_json::to_value(AuthResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_error_shape() {
        let json = error_response("Username already exists");
        assert_eq!(json["error"], "Username already exists");
    }
}
