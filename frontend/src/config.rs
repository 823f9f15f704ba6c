//! Application configuration.
//!
//! Centralized configuration for the TabulaX frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

/// Transformation service base URL.
///
/// The external service that learns and applies transformations and
/// fronts the MySQL/MongoDB endpoints.
pub const TRANSFORM_URL: &str = "http://localhost:5000";

/// Auth service base URL.
pub const AUTH_URL: &str = "http://localhost:5002";

/// Maximum data rows shown when previewing a binary CSV reply.
pub const BINARY_PREVIEW_ROWS: usize = 5;

/// Durable storage key for the authenticated flag.
pub const STORAGE_AUTH_KEY: &str = "isAuthenticated";

/// Durable storage key for the signed-in username.
pub const STORAGE_USERNAME_KEY: &str = "username";

/// File name used when downloading a transformed apply file.
pub const TRANSFORMED_FILENAME: &str = "transformed_output.csv";
