//! Movie mirror table operations
//!
//! Rows are written once, on first sight of an external identifier, and
//! never updated afterwards. The existence check and insert take any
//! executor so the mirroring pass can run them inside one transaction.

use marquee_common::db::models::Movie;
use marquee_common::Result;
use sqlx::{Sqlite, SqlitePool};

/// Check whether a movie id is already mirrored
pub async fn movie_exists<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

/// Insert a mirrored movie row
pub async fn insert_movie<'e, E>(executor: E, movie: &Movie) -> Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO movies (id, title, genre_ids, release_date, poster_path, overview)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(movie.id)
    .bind(&movie.title)
    .bind(&movie.genre_ids)
    .bind(&movie.release_date)
    .bind(&movie.poster_path)
    .bind(&movie.overview)
    .execute(executor)
    .await?;

    Ok(())
}

/// Fetch a single movie by id
pub async fn get_movie(pool: &SqlitePool, id: i64) -> Result<Option<Movie>> {
    let row: Option<MovieRow> = sqlx::query_as(
        "SELECT id, title, genre_ids, release_date, poster_path, overview FROM movies WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_movie))
}

/// Fetch movies by id, preserving the order of `ids`
pub async fn get_movies_by_ids(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<Movie>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, title, genre_ids, release_date, poster_path, overview FROM movies WHERE id IN ({})",
        placeholders
    );

    let mut query = sqlx::query_as::<_, MovieRow>(&sql);
    for id in ids {
        query = query.bind(*id);
    }
    let rows = query.fetch_all(pool).await?;

    let mut by_id: std::collections::HashMap<i64, Movie> = rows
        .into_iter()
        .map(row_to_movie)
        .map(|m| (m.id, m))
        .collect();

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

pub(crate) type MovieRow = (
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

pub(crate) fn row_to_movie(row: MovieRow) -> Movie {
    let (id, title, genre_ids, release_date, poster_path, overview) = row;
    Movie {
        id,
        title,
        genre_ids,
        release_date,
        poster_path,
        overview,
    }
}
