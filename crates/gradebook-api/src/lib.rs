//! JSON REST API for the gradebook.
//!
//! Exposes an axum [`Router`] backed by any [`gradebook_core::store::UserStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gradebook_api::api_router(store.clone()))
//! ```

pub mod account;
pub mod auth;
pub mod error;
pub mod form;
pub mod grades;
pub mod overview;
pub mod subjects;
pub mod weights;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use gradebook_core::store::UserStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: UserStore + 'static,
{
  Router::new()
    // Account
    .route("/account", get(account::me))
    .route("/account/register", post(account::register::<S>))
    .route("/account/login", post(account::login::<S>))
    .route("/account/logout", post(account::logout::<S>))
    // Weights
    .route("/weights", get(weights::list).post(weights::create::<S>))
    .route("/weights/{id}", put(weights::update::<S>).delete(weights::delete::<S>))
    // Subjects
    .route("/subjects", get(subjects::list).post(subjects::create::<S>))
    .route("/subjects/{id}", put(subjects::rename::<S>).delete(subjects::delete::<S>))
    // Grades
    .route("/grades", get(grades::list).post(grades::create::<S>))
    .route("/grades/by-subject", get(grades::by_subject))
    .route("/grades/{id}", axum::routing::delete(grades::delete::<S>))
    // Overview
    .route("/overview", get(overview::handler))
    .with_state(store)
}
