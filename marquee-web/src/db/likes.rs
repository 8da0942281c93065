//! Like store database operations
//!
//! Pair uniqueness of (user, movie) is an existence check at write time
//! only; nothing at the schema level backs it.

use marquee_common::db::models::Movie;
use marquee_common::Result;
use sqlx::SqlitePool;

/// Check whether the user already likes the movie
pub async fn like_exists(pool: &SqlitePool, user_guid: &str, movie_id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_guid = ? AND movie_id = ?)",
    )
    .bind(user_guid)
    .bind(movie_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Insert a like row
pub async fn insert_like(pool: &SqlitePool, user_guid: &str, movie_id: i64) -> Result<()> {
    sqlx::query("INSERT INTO likes (user_guid, movie_id) VALUES (?, ?)")
        .bind(user_guid)
        .bind(movie_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete the user's like rows for a movie, returning how many were removed
pub async fn delete_like(pool: &SqlitePool, user_guid: &str, movie_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM likes WHERE user_guid = ? AND movie_id = ?")
        .bind(user_guid)
        .bind(movie_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// The user's liked movies, most recently liked first
pub async fn liked_movies(pool: &SqlitePool, user_guid: &str) -> Result<Vec<Movie>> {
    let rows: Vec<crate::db::movies::MovieRow> = sqlx::query_as(
        r#"
        SELECT movies.id, movies.title, movies.genre_ids,
               movies.release_date, movies.poster_path, movies.overview
        FROM likes
        JOIN movies ON movies.id = likes.movie_id
        WHERE likes.user_guid = ?
        ORDER BY likes.id DESC
        "#,
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(crate::db::movies::row_to_movie).collect())
}
