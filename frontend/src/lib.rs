//! TabulaX - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for learning data transformations from paired
//! example columns and applying them to CSV files, MySQL tables, and
//! MongoDB collections.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App (Router)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  "/"        HomePage                                         │
//! │  "/signin"  SignIn      "/signup"  SignUp                    │
//! │  "/app"     Workbench                                        │
//! │             ├── Header (username, logout)                    │
//! │             ├── Stepper (wizard sidebar)                     │
//! │             └── LearnStep | ApplyStep | MysqlStep | MongoStep│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`csv`] - In-memory dataset parsing and training-pair merge
//! - [`session`] - Learned artifact and its approval gate
//! - [`workflow`] - Wizard step machine and browse-state resets
//! - [`types`] - Shared previews, downloads, and errors
//! - [`components`] - UI components (Stepper, steps, auth, etc.)
//! - [`services`] - Backend communication (transform, MySQL, MongoDB, auth)

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod csv;
pub mod services;
pub mod session;
pub mod types;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{AppError, AppResult, ApplyExample, ApplyPreview, DownloadHandle, TablePreview};

// Core state
pub use session::{Approval, ArtifactKind, TransformArtifact, TransformSession};
pub use workflow::{WorkflowState, WorkflowStep};

// Components
pub use components::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 TabulaX - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/signin" view=SignIn/>
                    <Route path="/signup" view=SignUp/>
                    <Route path="/app" view=Workbench/>
                </Routes>
            </main>
        </Router>
    }
}

/// The four-step transformation workbench. Requires a stored session;
/// without one it bounces back to the sign-in page.
#[component]
fn Workbench() -> impl IntoView {
    let (username, _set_username) = create_signal(services::load_session());

    if username.get_untracked().is_none() {
        let navigate = use_navigate();
        navigate("/signin", Default::default());
    }

    // Global state shared across steps. The learned session survives
    // step navigation; only the MySQL/MongoDB scopes reset on entry.
    let workflow = create_rw_signal(WorkflowState::default());
    let session = create_rw_signal(TransformSession::default());
    let is_loading = create_rw_signal(false);

    // Learn/Apply inputs persist across revisits, so they live here
    // rather than inside the step components.
    let source_file = create_rw_signal(None::<File>);
    let target_file = create_rw_signal(None::<File>);
    let source_col = create_rw_signal(String::new());
    let target_col = create_rw_signal(String::new());

    view! {
        <div class="app-container">
            <Header username=username/>
            <div class="main-content">
                <Stepper workflow=workflow/>
                <div class="step-content">
                    {move || match workflow.with(|w| w.step) {
                        WorkflowStep::Learn => view! {
                            <LearnStep
                                session=session
                                source_file=source_file
                                target_file=target_file
                                source_col=source_col
                                target_col=target_col
                                is_loading=is_loading
                            />
                        }
                        .into_view(),
                        WorkflowStep::Apply => view! {
                            <ApplyStep
                                session=session
                                source_file=source_file
                                target_file=target_file
                                source_col=source_col
                                target_col=target_col
                                is_loading=is_loading
                            />
                        }
                        .into_view(),
                        WorkflowStep::MySql => view! {
                            <MysqlStep
                                workflow=workflow
                                session=session
                                is_loading=is_loading
                            />
                        }
                        .into_view(),
                        WorkflowStep::MongoDb => view! {
                            <MongoStep
                                workflow=workflow
                                session=session
                                is_loading=is_loading
                            />
                        }
                        .into_view(),
                    }}
                </div>
            </div>
            <Footer/>
        </div>
    }
}
