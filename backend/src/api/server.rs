//! HTTP Server for the TabulaX auth API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                     |
//! |--------|---------------|---------------------------------|
//! | GET    | `/health`     | Health check                    |
//! | POST   | `/api/signup` | Create an account               |
//! | POST   | `/api/login`  | Verify username/password        |

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;

use super::types::{error_response, AuthResponse, CredentialsRequest};
use crate::error::AuthError;
use crate::store::UserRegistry;

/// Shared handler state: the user registry behind a lock.
type SharedRegistry = Arc<Mutex<UserRegistry>>;

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let registry: SharedRegistry = Arc::new(Mutex::new(UserRegistry::new()));

    // CORS permissive for development: the frontend is served from
    // another origin (trunk dev server).
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .layer(cors)
        .with_state(registry);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🔐 TabulaX auth service running on http://localhost:{}", port);
    println!("   POST /api/signup - Create account");
    println!("   POST /api/login  - Verify credentials");
    println!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tabulax-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "signup": "POST /api/signup",
            "login": "POST /api/login"
        }
    }))
}

/// Create account endpoint
async fn signup(
    State(registry): State<SharedRegistry>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<Value>)> {
    println!("[signup] {}", req.username);

    registry
        .lock()
        .signup(&req.username, &req.password)
        .map_err(|e| (signup_status(&e), Json(error_response(&e.to_string()))))?;

    Ok(Json(AuthResponse::ok()))
}

/// Verify credentials endpoint
async fn login(
    State(registry): State<SharedRegistry>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<Value>)> {
    println!("[login] {}", req.username);

    registry
        .lock()
        .login(&req.username, &req.password)
        .map_err(|e| (login_status(&e), Json(error_response(&e.to_string()))))?;

    Ok(Json(AuthResponse::ok()))
}

fn signup_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingFields | AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn login_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingFields => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
        AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_conflict_is_400() {
        assert_eq!(
            signup_status(&AuthError::UsernameTaken),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_login_failure_is_401() {
        assert_eq!(
            login_status(&AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
    }
}
