//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;

const MARQUEE_CSS: &str = include_str!("../../../static/marquee.css");
const DARK_MODE_JS: &str = include_str!("../../../static/dark-mode.js");
const LIKE_JS: &str = include_str!("../../../static/like.js");
const REMOVE_LIKE_JS: &str = include_str!("../../../static/remove_like.js");
const LOAD_MORE_JS: &str = include_str!("../../../static/load_more.js");
const REVIEW_JS: &str = include_str!("../../../static/review.js");

fn asset_response(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", content_type),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

/// GET /static/marquee.css
pub async fn serve_marquee_css() -> Response {
    asset_response("text/css", MARQUEE_CSS)
}

/// GET /static/dark-mode.js
pub async fn serve_dark_mode_js() -> Response {
    asset_response("application/javascript", DARK_MODE_JS)
}

/// GET /static/like.js
pub async fn serve_like_js() -> Response {
    asset_response("application/javascript", LIKE_JS)
}

/// GET /static/remove_like.js
pub async fn serve_remove_like_js() -> Response {
    asset_response("application/javascript", REMOVE_LIKE_JS)
}

/// GET /static/load_more.js
pub async fn serve_load_more_js() -> Response {
    asset_response("application/javascript", LOAD_MORE_JS)
}

/// GET /static/review.js
pub async fn serve_review_js() -> Response {
    asset_response("application/javascript", REVIEW_JS)
}
