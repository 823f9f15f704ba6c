//! # TabulaX Auth - username/password service for the TabulaX app
//!
//! A thin authentication service fronting the TabulaX data transformation
//! frontend. Accounts live in a JSON-file registry on disk; passwords are
//! stored as bcrypt hashes only.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabulax_backend::server::start_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     start_server(5002).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`store`] - Persistent user registry
//! - [`api`] - HTTP API server

// Core modules
pub mod error;

// Persistence
pub mod store;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{AuthError, ServerError, StoreError};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{StoredUser, UserRegistry};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, AuthResponse, CredentialsRequest};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
