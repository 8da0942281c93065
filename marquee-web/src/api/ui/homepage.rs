//! Homepage: popular listing plus mirror

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use super::layout::{flash_banner, movie_cards, page};
use crate::auth::CurrentUser;
use crate::services::mirror::{self, ReleaseDateFallback};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct HomepageParams {
    pub flash: Option<String>,
}

/// GET /homepage
///
/// Fetches the first popular page from the external API, mirrors any
/// unseen movies, and renders the grid. Upstream failures propagate;
/// the listing path has no fallback content.
pub async fn homepage(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<HomepageParams>,
) -> ApiResult<Html<String>> {
    let listing = state.tmdb.popular(1).await?;
    mirror::mirror_page(&state.db, &listing.results, ReleaseDateFallback::Omit).await?;

    let ids: Vec<i64> = listing.results.iter().map(|m| m.id).collect();
    let movies = crate::db::movies::get_movies_by_ids(&state.db, &ids).await?;

    let body = format!(
        r#"<form class="search-form" method="get" action="/search">
            <input type="text" name="search" placeholder="Search movies..." required>
            <button type="submit" class="btn">Search</button>
        </form>
        {cards}
        <button id="load-more-button" class="btn">Load More</button>
        <script src="/static/like.js"></script>
        <script src="/static/load_more.js"></script>"#,
        cards = movie_cards(&movies, true, false),
    );

    Ok(Html(page(
        "Homepage",
        Some(&user.username),
        &flash_banner(params.flash.as_deref()),
        &body,
    )))
}
