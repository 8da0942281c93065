//! Review store database operations

use marquee_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// A review joined with the submitting username, as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithUser {
    pub username: String,
    pub rating: i64,
    pub review_text: Option<String>,
}

/// Insert a review row
///
/// No rating validation here: the form entry point bounds the rating
/// before calling, the JSON entry point does not.
pub async fn insert_review(
    pool: &SqlitePool,
    user_guid: &str,
    movie_id: i64,
    rating: i64,
    review_text: Option<&str>,
) -> Result<()> {
    sqlx::query("INSERT INTO reviews (user_guid, movie_id, rating, review_text) VALUES (?, ?, ?, ?)")
        .bind(user_guid)
        .bind(movie_id)
        .bind(rating)
        .bind(review_text)
        .execute(pool)
        .await?;

    Ok(())
}

/// All reviews for a movie with usernames attached
///
/// No explicit ordering clause; callers get whatever the engine returns.
pub async fn reviews_for_movie(pool: &SqlitePool, movie_id: i64) -> Result<Vec<ReviewWithUser>> {
    let rows: Vec<(String, i64, Option<String>)> = sqlx::query_as(
        r#"
        SELECT users.username, reviews.rating, reviews.review_text
        FROM reviews
        JOIN users ON users.guid = reviews.user_guid
        WHERE reviews.movie_id = ?
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(username, rating, review_text)| ReviewWithUser {
            username,
            rating,
            review_text,
        })
        .collect())
}
