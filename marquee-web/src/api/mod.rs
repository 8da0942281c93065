//! HTTP handlers for marquee-web
//!
//! Split by concern: `ui` renders HTML pages, the sibling modules serve
//! the form posts and AJAX endpoints behind them.

pub mod auth;
pub mod health;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod settings;
pub mod ui;

pub use auth::auth_routes;
pub use health::health_routes;
pub use likes::like_routes;
pub use movies::movie_routes;
pub use reviews::review_routes;
pub use settings::settings_routes;
pub use ui::ui_routes;

use serde::Serialize;

/// JSON body for AJAX endpoints: `{"status": "...", "message": "..."}`
#[derive(Debug, Serialize)]
pub struct AjaxStatus {
    pub status: &'static str,
    pub message: String,
}

impl AjaxStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
