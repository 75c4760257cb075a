//! catalog-web library - library catalog web application
//!
//! Server-rendered HTML pages for listing and managing the authors, books,
//! genres and book instances of a small library. Exposed as a library so
//! integration tests can drive the router directly.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod validation;
pub mod views;

pub use crate::error::{CatalogError, CatalogResult};

/// Name reported by the health endpoint and used for the config file
pub const MODULE_NAME: &str = "catalog-web";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::catalog_routes())
        .merge(api::static_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
