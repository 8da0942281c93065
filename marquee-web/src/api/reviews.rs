//! Review endpoints
//!
//! Two entry points feed the same table. The form variant bounds the
//! rating to 1–10 before inserting; the JSON variant does not — that
//! asymmetry is longstanding behavior and both sides of it are kept.

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::AjaxStatus;
use crate::auth::CurrentUser;
use crate::db::reviews::ReviewWithUser;
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub movie_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub review_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: i64,
    #[serde(default)]
    pub review_text: String,
}

fn normalize_text(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// POST /submit_review
///
/// AJAX submit: unconditional insert, no rating bound check.
pub async fn submit_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ReviewRequest>,
) -> ApiResult<Json<AjaxStatus>> {
    crate::db::reviews::insert_review(
        &state.db,
        &user.guid,
        payload.movie_id,
        payload.rating,
        normalize_text(payload.review_text).as_deref(),
    )
    .await?;

    debug!(
        "User {} reviewed movie {} ({}/10)",
        user.username, payload.movie_id, payload.rating
    );
    Ok(Json(AjaxStatus::success("Review submitted successfully")))
}

/// POST /movie/:id/review
///
/// Form submit: the rating bound is enforced here and only here.
pub async fn submit_review_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(movie_id): Path<i64>,
    Form(form): Form<ReviewForm>,
) -> ApiResult<Redirect> {
    if !(1..=10).contains(&form.rating) {
        return Ok(Redirect::to(&format!("/movie/{}?flash=rating_invalid", movie_id)));
    }

    crate::db::reviews::insert_review(
        &state.db,
        &user.guid,
        movie_id,
        form.rating,
        normalize_text(Some(form.review_text)).as_deref(),
    )
    .await?;

    debug!(
        "User {} reviewed movie {} ({}/10, form)",
        user.username, movie_id, form.rating
    );
    Ok(Redirect::to(&format!("/movie/{}?flash=review_added", movie_id)))
}

/// GET /get_reviews/:id
///
/// All reviews for the movie with usernames attached, unordered.
pub async fn get_reviews(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(movie_id): Path<i64>,
) -> ApiResult<Json<Vec<ReviewWithUser>>> {
    let reviews = crate::db::reviews::reviews_for_movie(&state.db, movie_id).await?;
    Ok(Json(reviews))
}

/// Build review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/submit_review", post(submit_review))
        .route("/get_reviews/:id", get(get_reviews))
        .route("/movie/:id/review", post(submit_review_form))
}
