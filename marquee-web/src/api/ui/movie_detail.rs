//! Movie detail page
//!
//! The review form posts to the form endpoint; review.js intercepts the
//! submit and goes through the JSON endpoint instead, then refreshes
//! the reviews list from /get_reviews.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

use super::layout::{escape_html, flash_banner, page};
use crate::auth::CurrentUser;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub flash: Option<String>,
}

/// GET /movie/:id
pub async fn movie_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(movie_id): Path<i64>,
    Query(params): Query<DetailParams>,
) -> ApiResult<Html<String>> {
    let movie = crate::db::movies::get_movie(&state.db, movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Movie {} not found", movie_id)))?;

    let liked = crate::db::likes::like_exists(&state.db, &user.guid, movie_id).await?;

    let poster = match &movie.poster_path {
        Some(path) => format!(
            r#"<img class="detail-poster" src="https://image.tmdb.org/t/p/w500{}" alt="{} poster">"#,
            escape_html(path),
            escape_html(&movie.title)
        ),
        None => String::new(),
    };

    let release_date = movie.release_date.as_deref().unwrap_or("Unknown");
    let overview = movie.overview.as_deref().unwrap_or("No overview available.");

    let like_form = if liked {
        r#"<p class="liked-note">In your likes.</p>"#.to_string()
    } else {
        format!(
            r#"<form method="post" action="/movie/{}/like">
                <button type="submit" class="btn">Like</button>
            </form>"#,
            movie.id
        )
    };

    let body = format!(
        r#"<article class="movie-detail">
            {poster}
            <div class="detail-body">
                <h2>{title}</h2>
                <p class="release-date">Released: {release_date}</p>
                <p>{overview}</p>
                {like_form}
            </div>
        </article>
        <section class="reviews">
            <h3>Reviews</h3>
            <form id="review-form" method="post" action="/movie/{id}/review" data-movie-id="{id}">
                <label for="rating">Rating (1-10)</label>
                <input type="number" id="rating" name="rating" min="1" max="10" required>
                <label for="review_text">Review</label>
                <textarea id="review_text" name="review_text"></textarea>
                <button type="submit" class="btn">Submit review</button>
            </form>
            <div id="reviews-section"></div>
        </section>
        <script src="/static/review.js"></script>"#,
        poster = poster,
        title = escape_html(&movie.title),
        release_date = escape_html(release_date),
        overview = escape_html(overview),
        like_form = like_form,
        id = movie.id,
    );

    Ok(Html(page(
        &movie.title,
        Some(&user.username),
        &flash_banner(params.flash.as_deref()),
        &body,
    )))
}
