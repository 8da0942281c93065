//! marquee-web library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::tmdb::TmdbClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Client for the external movie-metadata API
    pub tmdb: Arc<TmdbClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, tmdb: TmdbClient) -> Self {
        Self {
            db,
            tmdb: Arc::new(tmdb),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // HTML pages
        .merge(api::ui_routes())
        // Login / signup / logout (pages + form posts)
        .merge(api::auth_routes())
        // JSON endpoints
        .merge(api::movie_routes())
        .merge(api::like_routes())
        .merge(api::review_routes())
        .merge(api::settings_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
