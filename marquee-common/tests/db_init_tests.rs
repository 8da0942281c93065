//! Unit tests for database initialization and schema shape

use marquee_common::db::init::init_database;
use std::path::PathBuf;

fn temp_db_path(tag: &str) -> PathBuf {
    PathBuf::from(format!("/tmp/marquee-test-db-{}-{}.db", tag, std::process::id()))
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let db_path = temp_db_path("create");
    let _ = std::fs::remove_file(&db_path);

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");

    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_database_opens_existing() {
    let db_path = temp_db_path("existing");
    let _ = std::fs::remove_file(&db_path);

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());

    // Second open must succeed against the already-initialized file
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    drop(pool1);
    drop(pool2);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let db_path = temp_db_path("settings");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let timeout: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'session_timeout_seconds'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(timeout.as_deref(), Some("31536000"));

    let port: Option<String> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'http_port'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert_eq!(port.as_deref(), Some("8350"));

    // The TMDB key must stay unset until explicitly configured
    let key: Option<Option<String>> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = 'tmdb_api_key'")
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert!(key.is_none());

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_migrations_are_recorded_and_idempotent() {
    let db_path = temp_db_path("migrations");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let version: i32 =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(version, 2);

    // Re-running the full migration pass must be a no-op
    marquee_common::db::migrations::run_migrations(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2);

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_likes_pair_is_not_structurally_unique() {
    // The (user, movie) pair is only advisory-unique: the application
    // checks before inserting, but the schema must not reject duplicates.
    let db_path = temp_db_path("likes");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    sqlx::query("INSERT INTO users (guid, username, password_hash) VALUES ('u1', 'alice', 'x')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO movies (id, title, genre_ids) VALUES (42, 'The Test', '18,35')")
        .execute(&pool)
        .await
        .unwrap();

    for _ in 0..2 {
        sqlx::query("INSERT INTO likes (user_guid, movie_id) VALUES ('u1', 42)")
            .execute(&pool)
            .await
            .unwrap();
    }

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE user_guid = 'u1' AND movie_id = 42")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 2);

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_movie_primary_key_rejects_duplicate_external_id() {
    // Unlike likes, a movie-mirror race fails loudly on the primary key.
    let db_path = temp_db_path("movies");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    sqlx::query("INSERT INTO movies (id, title, genre_ids) VALUES (7, 'Seven', '80')")
        .execute(&pool)
        .await
        .unwrap();
    let dup = sqlx::query("INSERT INTO movies (id, title, genre_ids) VALUES (7, 'Seven Again', '80')")
        .execute(&pool)
        .await;
    assert!(dup.is_err());

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}
