//! Login session database operations

use marquee_common::Result;
use sqlx::SqlitePool;

/// A session row joined with its owning user
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_guid: String,
    pub username: String,
    pub expires_at: String,
}

/// Insert a new session row
pub async fn insert_session(
    pool: &SqlitePool,
    token: &str,
    user_guid: &str,
    expires_at: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO sessions (token, user_guid, expires_at) VALUES (?, ?, ?)")
        .bind(token)
        .bind(user_guid)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Resolve a session token to its user
///
/// Expiry is checked by the caller; this only joins the rows.
pub async fn get_session_user(pool: &SqlitePool, token: &str) -> Result<Option<SessionUser>> {
    let row: Option<(String, String, String)> = sqlx::query_as(
        r#"
        SELECT sessions.user_guid, users.username, sessions.expires_at
        FROM sessions
        JOIN users ON users.guid = sessions.user_guid
        WHERE sessions.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(user_guid, username, expires_at)| SessionUser {
        user_guid,
        username,
        expires_at,
    }))
}

/// Delete a session row
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
