//! Dashboard: the user's liked movies

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use super::layout::{flash_banner, movie_cards, page};
use crate::auth::CurrentUser;
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub flash: Option<String>,
}

/// GET /dashboard
///
/// Liked movies, most recently liked first. Served entirely from the
/// local mirror; no external calls.
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Html<String>> {
    let movies = crate::db::likes::liked_movies(&state.db, &user.guid).await?;

    let body = if movies.is_empty() {
        r#"<p>You haven't liked any movies yet. <a href="/homepage">Browse the homepage</a>.</p>"#
            .to_string()
    } else {
        format!(
            r#"<h2>Your liked movies</h2>
            {cards}
            <script src="/static/remove_like.js"></script>"#,
            cards = movie_cards(&movies, false, true),
        )
    };

    Ok(Html(page(
        "Dashboard",
        Some(&user.username),
        &flash_banner(params.flash.as_deref()),
        &body,
    )))
}
