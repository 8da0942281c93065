//! User account database operations

use marquee_common::db::models::User;
use marquee_common::Result;
use sqlx::SqlitePool;

/// Insert a new user row
pub async fn insert_user(
    pool: &SqlitePool,
    guid: &str,
    username: &str,
    password_hash: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO users (guid, username, password_hash) VALUES (?, ?, ?)")
        .bind(guid)
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(())
}

/// Look up a user by username, case-insensitively
pub async fn get_user_by_username_ci(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row: Option<(String, String, String)> = sqlx::query_as(
        "SELECT guid, username, password_hash FROM users WHERE LOWER(username) = LOWER(?)",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(guid, username, password_hash)| User {
        guid,
        username,
        password_hash,
    }))
}

/// Check whether a username is taken, case-insensitively
///
/// `exclude_guid` skips the given user so settings updates don't collide
/// with the caller's own row.
pub async fn username_taken_ci(
    pool: &SqlitePool,
    username: &str,
    exclude_guid: Option<&str>,
) -> Result<bool> {
    let taken: bool = match exclude_guid {
        Some(guid) => {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER(?) AND guid != ?)",
            )
            .bind(username)
            .bind(guid)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER(?))")
                .bind(username)
                .fetch_one(pool)
                .await?
        }
    };

    Ok(taken)
}

/// Update a user's username
pub async fn update_username(pool: &SqlitePool, guid: &str, username: &str) -> Result<()> {
    sqlx::query("UPDATE users SET username = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?")
        .bind(username)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(())
}

/// Update a user's password hash
pub async fn update_password(pool: &SqlitePool, guid: &str, password_hash: &str) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?")
        .bind(password_hash)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(())
}
