//! Settings API endpoint
//!
//! Provides POST /api/settings/tmdb_api_key so the key can be
//! configured without editing files. The database is the authoritative
//! tier; the TOML backup write is best-effort.

use crate::{ApiError, ApiResult, AppState};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Request payload for setting the TMDB API key
#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// Response payload for API key configuration
#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/settings/tmdb_api_key handler
///
/// **Request:** `{"api_key": "your-tmdb-key"}`
/// **Response:** `{"success": true, "message": "..."}`
///
/// **Note:** TOML write failures log warnings but do not fail the request
pub async fn set_tmdb_api_key(
    State(state): State<AppState>,
    Json(payload): Json<SetApiKeyRequest>,
) -> ApiResult<Json<SetApiKeyResponse>> {
    if !crate::config::is_valid_key(&payload.api_key) {
        return Err(ApiError::BadRequest(
            "API key cannot be empty or whitespace-only".to_string(),
        ));
    }

    crate::db::settings::set_tmdb_api_key(&state.db, payload.api_key.clone())
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save API key to database: {}", e)))?;

    info!("TMDB API key configured via Web UI");

    // Sync to TOML (best-effort backup)
    match marquee_common::config::config_file_path() {
        Ok(toml_path) => {
            let mut config = marquee_common::config::load_toml_config_from(&toml_path)
                .unwrap_or_default();
            config.tmdb_api_key = Some(payload.api_key);
            match marquee_common::config::write_toml_config(&config, &toml_path) {
                Ok(()) => info!("API key synced to TOML: {}", toml_path.display()),
                Err(e) => warn!("TOML sync failed (database write succeeded): {}", e),
            }
        }
        Err(e) => warn!("TOML sync skipped: {}", e),
    }

    Ok(Json(SetApiKeyResponse {
        success: true,
        message: "TMDB API key configured successfully".to_string(),
    }))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/api/settings/tmdb_api_key", post(set_tmdb_api_key))
}
