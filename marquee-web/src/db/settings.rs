//! Settings table accessors

use marquee_common::Result;
use sqlx::SqlitePool;

/// Get a setting value by key
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.flatten())
}

/// Set a setting value, inserting or replacing
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the configured TMDB API key, if any
pub async fn get_tmdb_api_key(pool: &SqlitePool) -> Result<Option<String>> {
    get_setting(pool, "tmdb_api_key").await
}

/// Store the TMDB API key (authoritative configuration tier)
pub async fn set_tmdb_api_key(pool: &SqlitePool, key: String) -> Result<()> {
    set_setting(pool, "tmdb_api_key", &key).await
}

/// Session lifetime in seconds (default one year)
pub async fn get_session_timeout_seconds(pool: &SqlitePool) -> Result<i64> {
    let value: Option<i64> = sqlx::query_scalar(
        "SELECT CAST(value AS INTEGER) FROM settings WHERE key = 'session_timeout_seconds'",
    )
    .fetch_optional(pool)
    .await?;

    Ok(value.unwrap_or(31_536_000))
}

/// HTTP listen port (default 8350)
pub async fn get_http_port(pool: &SqlitePool) -> Result<u16> {
    let value: Option<i64> =
        sqlx::query_scalar("SELECT CAST(value AS INTEGER) FROM settings WHERE key = 'http_port'")
            .fetch_optional(pool)
            .await?;

    Ok(value.map(|p| p as u16).unwrap_or(8350))
}
