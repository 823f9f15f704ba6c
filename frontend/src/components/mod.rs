//! UI Components for the TabulaX application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - App banner with username and logout
//! - [`Hero`] - Landing title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`Stepper`] - Wizard step sidebar
//! - [`LearnStep`] - Upload source/target CSVs and learn a transformation
//! - [`ApplyStep`] - Preview/apply the transformation to a file
//! - [`MysqlStep`] - MySQL drill-down and apply
//! - [`MongoStep`] - MongoDB drill-down and apply
//! - [`SignIn`] / [`SignUp`] - Auth forms
//! - [`HomePage`] - Minimal landing page

mod apply;
mod auth;
mod footer;
mod header;
mod hero;
mod home;
mod learn;
mod mongo;
mod mysql;
mod stepper;

pub use apply::*;
pub use auth::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use home::*;
pub use learn::*;
pub use mongo::*;
pub use mysql::*;
pub use stepper::*;
