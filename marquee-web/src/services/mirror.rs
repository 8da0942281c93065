//! Metadata mirroring
//!
//! Upserts a page of external movie summaries into the local movies
//! table: look up each result by its external identifier, insert the
//! ones not yet seen, commit once per page. Already-mirrored rows are
//! left untouched, so re-mirroring a page is a no-op and stale metadata
//! is accepted.

use chrono::NaiveDate;
use marquee_common::db::models::Movie;
use marquee_common::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::services::tmdb::TmdbMovie;

/// Substitute release date for search-triggered ingestion
pub const SENTINEL_RELEASE_DATE: &str = "1900-01-01";

/// What to store when the source omits or mis-formats a release date
///
/// The listing path stores NULL; the search path substitutes the
/// sentinel. The asymmetry is longstanding ingest behavior and both
/// sides of it are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDateFallback {
    Omit,
    Sentinel,
}

/// Normalize a raw release date to storable form
///
/// Accepts only YYYY-MM-DD; anything else (absent, empty, malformed)
/// takes the fallback.
pub fn normalize_release_date(
    raw: Option<&str>,
    fallback: ReleaseDateFallback,
) -> Option<String> {
    let parsed = raw
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

    match (parsed, fallback) {
        (Some(date), _) => Some(date.format("%Y-%m-%d").to_string()),
        (None, ReleaseDateFallback::Omit) => None,
        (None, ReleaseDateFallback::Sentinel) => Some(SENTINEL_RELEASE_DATE.to_string()),
    }
}

/// Comma-join genre ids for denormalized storage
pub fn join_genre_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Mirror one page of API results into the movies table
///
/// Returns the number of newly inserted rows. The whole page commits in
/// a single transaction.
pub async fn mirror_page(
    pool: &SqlitePool,
    results: &[TmdbMovie],
    fallback: ReleaseDateFallback,
) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for summary in results {
        if crate::db::movies::movie_exists(&mut *tx, summary.id).await? {
            continue;
        }

        let movie = Movie {
            id: summary.id,
            title: summary.title.clone(),
            genre_ids: join_genre_ids(&summary.genre_ids),
            release_date: normalize_release_date(summary.release_date.as_deref(), fallback),
            poster_path: summary.poster_path.clone(),
            overview: summary.overview.clone(),
        };

        crate::db::movies::insert_movie(&mut *tx, &movie).await?;
        debug!("Mirrored movie {} ({:?})", movie.id, movie.title);
        inserted += 1;
    }

    tx.commit().await?;

    if inserted > 0 {
        info!("Mirrored {} new movie(s)", inserted);
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        // One connection: each :memory: connection is its own database
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        marquee_common::db::init_schema(&pool).await.unwrap();
        pool
    }

    fn summary(id: i64, title: &str, release_date: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.to_string(),
            genre_ids: vec![18, 35],
            release_date: release_date.map(|s| s.to_string()),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            overview: Some("An overview.".to_string()),
        }
    }

    #[tokio::test]
    async fn mirroring_same_page_twice_does_not_duplicate() {
        let pool = test_pool().await;
        let page = vec![
            summary(1, "First", Some("2001-01-01")),
            summary(2, "Second", Some("2002-02-02")),
        ];

        let first = mirror_page(&pool, &page, ReleaseDateFallback::Omit).await.unwrap();
        assert_eq!(first, 2);

        let second = mirror_page(&pool, &page, ReleaseDateFallback::Omit).await.unwrap();
        assert_eq!(second, 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn listing_path_stores_null_for_malformed_date() {
        let pool = test_pool().await;
        let page = vec![summary(3, "Undated", Some("not-a-date"))];

        mirror_page(&pool, &page, ReleaseDateFallback::Omit).await.unwrap();

        let stored: Option<String> =
            sqlx::query_scalar("SELECT release_date FROM movies WHERE id = 3")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn search_path_substitutes_sentinel_date() {
        let pool = test_pool().await;
        let page = vec![summary(4, "Searched", None)];

        mirror_page(&pool, &page, ReleaseDateFallback::Sentinel).await.unwrap();

        let stored: Option<String> =
            sqlx::query_scalar("SELECT release_date FROM movies WHERE id = 4")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(stored.as_deref(), Some(SENTINEL_RELEASE_DATE));
    }

    #[tokio::test]
    async fn genre_ids_store_comma_joined() {
        let pool = test_pool().await;
        let page = vec![summary(5, "Genres", Some("2005-05-05"))];

        mirror_page(&pool, &page, ReleaseDateFallback::Omit).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT genre_ids FROM movies WHERE id = 5")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, "18,35");
    }

    #[test]
    fn normalize_release_date_accepts_valid() {
        assert_eq!(
            normalize_release_date(Some("1999-10-15"), ReleaseDateFallback::Omit).as_deref(),
            Some("1999-10-15")
        );
    }

    #[test]
    fn normalize_release_date_rejects_empty_and_garbage() {
        for raw in [None, Some(""), Some("  "), Some("15/10/1999"), Some("1999-13-40")] {
            assert_eq!(normalize_release_date(raw, ReleaseDateFallback::Omit), None);
            assert_eq!(
                normalize_release_date(raw, ReleaseDateFallback::Sentinel).as_deref(),
                Some(SENTINEL_RELEASE_DATE)
            );
        }
    }

    #[test]
    fn join_genre_ids_formats() {
        assert_eq!(join_genre_ids(&[]), "");
        assert_eq!(join_genre_ids(&[18]), "18");
        assert_eq!(join_genre_ids(&[18, 35, 80]), "18,35,80");
    }
}
