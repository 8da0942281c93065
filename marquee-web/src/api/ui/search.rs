//! Movie search against the external API

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::warn;

use super::layout::{escape_html, flash_banner, movie_cards, page};
use crate::auth::CurrentUser;
use crate::services::mirror::{self, ReleaseDateFallback};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// GET /search?search=QUERY
///
/// Queries the external API and mirrors the results before rendering.
/// A non-200 upstream answer surfaces as a flash banner over an empty
/// result set; nothing is mirrored in that case.
pub async fn search(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Html<String>> {
    let (movies, banner) = match state.tmdb.search(&params.search).await {
        Ok(found) => {
            mirror::mirror_page(&state.db, &found.results, ReleaseDateFallback::Sentinel).await?;

            let ids: Vec<i64> = found.results.iter().map(|m| m.id).collect();
            let movies = crate::db::movies::get_movies_by_ids(&state.db, &ids).await?;
            (movies, String::new())
        }
        Err(e) => {
            warn!("Movie search failed: {}", e);
            (Vec::new(), flash_banner(Some("search_failed")))
        }
    };

    let heading = if !banner.is_empty() {
        String::new()
    } else if movies.is_empty() {
        format!("<p>No results for \"{}\".</p>", escape_html(&params.search))
    } else {
        format!("<h2>Results for \"{}\"</h2>", escape_html(&params.search))
    };

    let body = format!(
        r#"<form class="search-form" method="get" action="/search">
            <input type="text" name="search" value="{query}" required>
            <button type="submit" class="btn">Search</button>
        </form>
        {heading}
        {cards}
        <script src="/static/like.js"></script>"#,
        query = escape_html(&params.search),
        heading = heading,
        cards = movie_cards(&movies, true, false),
    );

    Ok(Html(page("Search", Some(&user.username), &banner, &body)))
}
