//! UI Routes - HTML pages for the Marquee web interface
//!
//! All pages are rendered server-side into a shared shell (see
//! `layout`); the JavaScript under /static/ is vanilla ES6+, no
//! frameworks.

use axum::{routing::get, Router};

use crate::AppState;

pub mod layout;
pub mod login;
pub mod signup;

mod dashboard;
mod homepage;
mod movie_detail;
mod search;
mod settings;
mod static_assets;

use dashboard::dashboard;
use homepage::homepage;
use movie_detail::movie_detail;
use search::search;
use settings::{settings_page, settings_submit};
use static_assets::{
    serve_dark_mode_js, serve_like_js, serve_load_more_js, serve_marquee_css,
    serve_remove_like_js, serve_review_js,
};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/homepage", get(homepage))
        .route("/search", get(search))
        .route("/dashboard", get(dashboard))
        .route("/movie/:id", get(movie_detail))
        .route("/settings", get(settings_page).post(settings_submit))
        // Static assets
        .route("/static/marquee.css", get(serve_marquee_css))
        .route("/static/dark-mode.js", get(serve_dark_mode_js))
        .route("/static/like.js", get(serve_like_js))
        .route("/static/remove_like.js", get(serve_remove_like_js))
        .route("/static/load_more.js", get(serve_load_more_js))
        .route("/static/review.js", get(serve_review_js))
}
