//! Paginated movie listing (AJAX)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use marquee_common::db::models::Movie;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::services::mirror::{self, ReleaseDateFallback};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct LoadMoreParams {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// GET /load_more_movies?page=N
///
/// Fetches one more page from the external API, mirrors any unseen
/// movies, and returns the page as a JSON array for the client to
/// append.
pub async fn load_more_movies(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<LoadMoreParams>,
) -> ApiResult<Json<Vec<Movie>>> {
    let page = state.tmdb.popular(params.page).await?;
    mirror::mirror_page(&state.db, &page.results, ReleaseDateFallback::Omit).await?;

    let ids: Vec<i64> = page.results.iter().map(|m| m.id).collect();
    let movies = crate::db::movies::get_movies_by_ids(&state.db, &ids).await?;

    Ok(Json(movies))
}

/// Build movie listing routes
pub fn movie_routes() -> Router<AppState> {
    Router::new().route("/load_more_movies", get(load_more_movies))
}
