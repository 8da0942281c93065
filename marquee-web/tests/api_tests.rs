//! Integration tests for the HTTP surface
//!
//! Drives the full router with in-memory SQLite. External-API-backed
//! routes (homepage, search, load_more) are exercised at the unit level
//! in the mirror module; everything here runs without network.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use marquee_web::services::tmdb::TmdbClient;
use marquee_web::{build_router, AppState};

async fn test_state() -> (Router, SqlitePool) {
    // One connection: each :memory: connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    marquee_common::db::init_schema(&pool).await.unwrap();

    let state = AppState::new(pool.clone(), TmdbClient::new(None).unwrap());
    (build_router(state), pool)
}

/// Insert a user directly and hand back (guid, session cookie)
async fn seeded_session(pool: &SqlitePool, username: &str) -> (String, String) {
    let guid = format!("guid-{}", username);
    let password_hash = marquee_web::auth::hash_password("pw1").unwrap();
    marquee_web::db::users::insert_user(pool, &guid, username, &password_hash)
        .await
        .unwrap();
    let token = marquee_web::auth::create_session(pool, &guid).await.unwrap();
    let cookie = format!("marquee_session={}", token);
    (guid, cookie)
}

async fn seed_movie(pool: &SqlitePool, id: i64, title: &str) {
    sqlx::query("INSERT INTO movies (id, title, genre_ids) VALUES (?, ?, '18,35')")
        .bind(id)
        .bind(title)
        .execute(pool)
        .await
        .unwrap();
}

fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(uri: &str, cookie: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup_then_login_with_different_case_succeeds() {
    let (app, _pool) = test_state().await;

    // Sign up as "alice"
    let response = app
        .clone()
        .oneshot(form_request("/signup", None, "username=alice&password=pw1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/homepage?flash=welcome");
    assert!(response.headers().contains_key(header::SET_COOKIE));

    // Log in as "Alice" - username lookup is case-insensitive
    let response = app
        .clone()
        .oneshot(form_request("/", None, "username=Alice&password=pw1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/homepage?flash=login_success");
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_signup_rejects_case_insensitive_duplicate() {
    let (app, pool) = test_state().await;
    seeded_session(&pool, "alice").await;

    let response = app
        .oneshot(form_request("/signup", None, "username=ALICE&password=pw2"))
        .await
        .unwrap();

    // Re-rendered signup page, no session issued
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let (app, pool) = test_state().await;
    seeded_session(&pool, "alice").await;

    // Unknown user and wrong password produce the same page, no cookie
    for body in ["username=nobody&password=pw1", "username=alice&password=wrong"] {
        let response = app.clone().oneshot(form_request("/", None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }
}

#[tokio::test]
async fn test_login_honors_next_target() {
    let (app, pool) = test_state().await;
    seeded_session(&pool, "alice").await;

    let response = app
        .oneshot(form_request(
            "/",
            None,
            "username=alice&password=pw1&next=/dashboard",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard?flash=login_success");
}

#[tokio::test]
async fn test_protected_route_redirects_to_login_with_next() {
    let (app, _pool) = test_state().await;

    let response = app.oneshot(get_request("/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?flash=login_required&next=/dashboard");
}

#[tokio::test]
async fn test_logout_tears_down_session() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;

    let response = app
        .clone()
        .oneshot(get_request("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?flash=logged_out");

    // The old cookie no longer authenticates
    let response = app
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?flash=login_required"));
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_like_twice_is_idempotent() {
    let (app, pool) = test_state().await;
    let (guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 42, "The Answer").await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request("/like_movie", &cookie, json!({"movie_id": 42})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Movie liked successfully");
    }

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE user_guid = ? AND movie_id = 42")
            .bind(&guid)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_like_unmirrored_movie_is_404() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;

    let response = app
        .oneshot(json_request("/like_movie", &cookie, json!({"movie_id": 42})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_unlike_never_liked_reports_error_without_mutation() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 42, "The Answer").await;

    let response = app
        .oneshot(json_request("/remove_like", &cookie, json!({"movie_id": 42})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Movie not in your likes");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_unlike_removes_existing_like() {
    let (app, pool) = test_state().await;
    let (guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 42, "The Answer").await;
    marquee_web::db::likes::insert_like(&pool, &guid, 42).await.unwrap();

    let response = app
        .oneshot(json_request("/remove_like", &cookie, json!({"movie_id": 42})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_form_like_flashes_distinct_messages() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 42, "The Answer").await;

    let response = app
        .clone()
        .oneshot(form_request("/movie/42/like", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movie/42?flash=liked");

    // Second submission is a no-op with different messaging
    let response = app
        .oneshot(form_request("/movie/42/like", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movie/42?flash=already_liked");
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_json_review_path_accepts_out_of_range_rating() {
    // Known inconsistency: only the form path bounds the rating
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 7, "Lucky").await;

    let response = app
        .oneshot(json_request(
            "/submit_review",
            &cookie,
            json!({"movie_id": 7, "rating": 15, "review_text": "off the scale"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");

    let rating: i64 = sqlx::query_scalar("SELECT rating FROM reviews WHERE movie_id = 7")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rating, 15);
}

#[tokio::test]
async fn test_form_review_path_rejects_out_of_range_rating() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 7, "Lucky").await;

    let response = app
        .oneshot(form_request(
            "/movie/7/review",
            Some(&cookie),
            "rating=15&review_text=nope",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movie/7?flash=rating_invalid");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_form_review_path_accepts_valid_rating() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 7, "Lucky").await;

    let response = app
        .oneshot(form_request(
            "/movie/7/review",
            Some(&cookie),
            "rating=8&review_text=solid",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movie/7?flash=review_added");

    let (rating, text): (i64, Option<String>) =
        sqlx::query_as("SELECT rating, review_text FROM reviews WHERE movie_id = 7")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rating, 8);
    assert_eq!(text.as_deref(), Some("solid"));
}

#[tokio::test]
async fn test_get_reviews_returns_all_with_usernames() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 7, "Lucky").await;

    for (rating, text) in [(9, "loved it"), (6, "fine")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "/submit_review",
                &cookie,
                json!({"movie_id": 7, "rating": rating, "review_text": text}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_request("/get_reviews/7", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reviews = body_json(response).await;
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    for review in reviews {
        assert_eq!(review["username"], "alice");
    }
}

// ============================================================================
// Dashboard and movie detail
// ============================================================================

#[tokio::test]
async fn test_dashboard_lists_likes_most_recent_first() {
    let (app, pool) = test_state().await;
    let (guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 1, "First Liked").await;
    seed_movie(&pool, 2, "Second Liked").await;
    marquee_web::db::likes::insert_like(&pool, &guid, 1).await.unwrap();
    marquee_web::db::likes::insert_like(&pool, &guid, 2).await.unwrap();

    let movies = marquee_web::db::likes::liked_movies(&pool, &guid).await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, 2);
    assert_eq!(movies[1].id, 1);

    let response = app
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_movie_detail_renders_and_unknown_is_404() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;
    seed_movie(&pool, 42, "The Answer").await;

    let response = app
        .clone()
        .oneshot(get_request("/movie/42", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/movie/999", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_username_update_lowercases_and_checks_collisions() {
    let (app, pool) = test_state().await;
    let (guid, cookie) = seeded_session(&pool, "alice").await;
    seeded_session(&pool, "bob").await;

    // Collision with another user, case-insensitively
    let response = app
        .clone()
        .oneshot(form_request("/settings", Some(&cookie), "username=BOB&password="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?flash=username_taken");

    // Successful rename stores lower-cased
    let response = app
        .oneshot(form_request(
            "/settings",
            Some(&cookie),
            "username=Alice2&password=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/settings?flash=settings_saved");

    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE guid = ?")
        .bind(&guid)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(username, "alice2");
}

#[tokio::test]
async fn test_settings_password_update_changes_login() {
    let (app, pool) = test_state().await;
    let (_guid, cookie) = seeded_session(&pool, "alice").await;

    let response = app
        .clone()
        .oneshot(form_request("/settings", Some(&cookie), "username=alice&password=newpw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Old password no longer works, new one does
    let response = app
        .clone()
        .oneshot(form_request("/", None, "username=alice&password=pw1"))
        .await
        .unwrap();
    assert!(!response.headers().contains_key(header::SET_COOKIE));

    let response = app
        .oneshot(form_request("/", None, "username=alice&password=newpw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

// ============================================================================
// Settings API and health
// ============================================================================

#[tokio::test]
async fn test_set_tmdb_api_key_persists_to_database() {
    let (app, pool) = test_state().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/settings/tmdb_api_key")
        .header("content-type", "application/json")
        .body(Body::from(json!({"api_key": "test-key-123"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let stored = marquee_web::db::settings::get_tmdb_api_key(&pool).await.unwrap();
    assert_eq!(stored.as_deref(), Some("test-key-123"));
}

#[tokio::test]
async fn test_set_tmdb_api_key_rejects_empty_key() {
    let (app, pool) = test_state().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/settings/tmdb_api_key")
        .header("content-type", "application/json")
        .body(Body::from(json!({"api_key": "   "}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = marquee_web::db::settings::get_tmdb_api_key(&pool).await.unwrap();
    assert_eq!(stored, None);
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let (app, _pool) = test_state().await;

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "marquee-web");
}
