//! Like endpoints
//!
//! The AJAX variant returns the same success body whether or not the
//! like already existed; the form variant flashes distinct messages.
//! Both require the movie to already be mirrored locally.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::AjaxStatus;
use crate::auth::CurrentUser;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub movie_id: i64,
}

/// POST /like_movie
///
/// AJAX add. Idempotent from the caller's perspective: an existing like
/// is left as-is and the response does not distinguish the no-op.
pub async fn like_movie(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<LikeRequest>,
) -> ApiResult<Response> {
    if !crate::db::movies::movie_exists(&state.db, payload.movie_id).await? {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(AjaxStatus::error("Movie not found")),
        )
            .into_response());
    }

    if !crate::db::likes::like_exists(&state.db, &user.guid, payload.movie_id).await? {
        crate::db::likes::insert_like(&state.db, &user.guid, payload.movie_id).await?;
        debug!("User {} liked movie {}", user.username, payload.movie_id);
    }

    Ok(Json(AjaxStatus::success("Movie liked successfully")).into_response())
}

/// POST /remove_like
///
/// AJAX remove. A like that was never there is a not-found-style error.
pub async fn remove_like(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<LikeRequest>,
) -> ApiResult<Response> {
    if !crate::db::movies::movie_exists(&state.db, payload.movie_id).await? {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(AjaxStatus::error("Movie not found")),
        )
            .into_response());
    }

    let removed = crate::db::likes::delete_like(&state.db, &user.guid, payload.movie_id).await?;
    if removed == 0 {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(AjaxStatus::error("Movie not in your likes")),
        )
            .into_response());
    }

    debug!("User {} unliked movie {}", user.username, payload.movie_id);
    Ok(Json(AjaxStatus::success("Movie removed from likes")).into_response())
}

/// POST /movie/:id/like
///
/// Form variant of the add; flashes distinguish a fresh like from a
/// repeat.
pub async fn like_movie_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(movie_id): Path<i64>,
) -> ApiResult<Redirect> {
    if !crate::db::movies::movie_exists(&state.db, movie_id).await? {
        return Err(ApiError::NotFound(format!("Movie {} not found", movie_id)));
    }

    if crate::db::likes::like_exists(&state.db, &user.guid, movie_id).await? {
        return Ok(Redirect::to(&format!("/movie/{}?flash=already_liked", movie_id)));
    }

    crate::db::likes::insert_like(&state.db, &user.guid, movie_id).await?;
    debug!("User {} liked movie {} (form)", user.username, movie_id);
    Ok(Redirect::to(&format!("/movie/{}?flash=liked", movie_id)))
}

/// Build like routes
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/like_movie", post(like_movie))
        .route("/remove_like", post(remove_like))
        .route("/movie/:id/like", post(like_movie_form))
}
