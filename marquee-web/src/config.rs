//! Configuration resolution for marquee-web
//!
//! Provides multi-tier resolution of the TMDB API key with
//! Database → ENV → TOML priority.

use marquee_common::config::TomlConfig;
use marquee_common::Result;
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

/// Environment variable carrying the TMDB API key
pub const TMDB_API_KEY_ENV: &str = "MARQUEE_TMDB_API_KEY";

/// Resolve TMDB API key from 3-tier configuration
///
/// **Priority:** Database → ENV → TOML
///
/// Returns None when no tier carries a valid key. The application still
/// starts in that case; listing and search requests surface the missing
/// key as an upstream failure until one is configured.
pub async fn resolve_tmdb_api_key(
    db: &Pool<Sqlite>,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    let mut sources = Vec::new();

    // Tier 1: Database (authoritative)
    let db_key = crate::db::settings::get_tmdb_api_key(db).await?;
    if let Some(key) = &db_key {
        if is_valid_key(key) {
            sources.push("database");
        }
    }

    // Tier 2: Environment variable
    let env_key = std::env::var(TMDB_API_KEY_ENV).ok();
    if let Some(key) = &env_key {
        if is_valid_key(key) {
            sources.push("environment");
        }
    }

    // Tier 3: TOML config
    let toml_key = toml_config.tmdb_api_key.clone();
    if let Some(key) = &toml_key {
        if is_valid_key(key) {
            sources.push("TOML");
        }
    }

    if sources.len() > 1 {
        warn!(
            "TMDB API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    if let Some(key) = db_key {
        if is_valid_key(&key) {
            info!("TMDB API key loaded from database");
            return Ok(Some(key));
        }
    }

    // ENV/TOML keys migrate into the database so the authoritative tier
    // carries them on the next startup.
    if let Some(key) = env_key {
        if is_valid_key(&key) {
            info!("TMDB API key loaded from environment variable");
            crate::db::settings::set_tmdb_api_key(db, key.clone()).await?;
            return Ok(Some(key));
        }
    }

    if let Some(key) = toml_key {
        if is_valid_key(&key) {
            info!("TMDB API key loaded from TOML config");
            crate::db::settings::set_tmdb_api_key(db, key.clone()).await?;
            return Ok(Some(key));
        }
    }

    warn!(
        "TMDB API key not configured. Configure using one of:\n\
         1. Web UI: POST /api/settings/tmdb_api_key\n\
         2. Environment: {}=your-key-here\n\
         3. TOML config: ~/.config/marquee/config.toml (tmdb_api_key = \"your-key\")",
        TMDB_API_KEY_ENV
    );
    Ok(None)
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_key_accepts_plain_text() {
        assert!(is_valid_key("abc123"));
    }

    #[test]
    fn valid_key_rejects_empty_and_whitespace() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   \t\n  "));
    }
}
