//! Error types for the TabulaX auth service.
//!
//! - [`StoreError`] - User store errors (disk registry)
//! - [`AuthError`] - Signup/login failures
//! - [`ServerError`] - Top-level HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the on-disk user registry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write a user record.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed user record on disk.
    #[error("Store JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("Hashing error: {0}")]
    HashError(String),
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(e: bcrypt::BcryptError) -> Self {
        StoreError::HashError(e.to_string())
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Signup/login failures surfaced to the client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing from the request.
    #[error("Missing fields")]
    MissingFields,

    /// Signup with a username that is already taken.
    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown username or wrong password. One message for both so the
    /// response does not reveal which usernames exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Store failure underneath an auth operation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Server Errors (top-level)
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Auth error.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // StoreError -> AuthError
        let store_err = StoreError::HashError("cost out of range".into());
        let auth_err: AuthError = store_err.into();
        assert!(auth_err.to_string().contains("cost out of range"));

        // AuthError -> ServerError
        let server_err: ServerError = AuthError::UsernameTaken.into();
        assert!(server_err.to_string().contains("already exists"));
    }

    #[test]
    fn test_credential_errors_share_one_message() {
        // Unknown user and wrong password must be indistinguishable.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }
}
