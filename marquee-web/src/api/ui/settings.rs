//! Profile settings page
//!
//! Username and password updates commit independently: a password
//! update can land even if nothing else in the form changed, and vice
//! versa.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use super::layout::{escape_html, flash_banner, page};
use crate::auth::{hash_password, CurrentUser};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SettingsParams {
    pub flash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /settings
pub async fn settings_page(
    user: CurrentUser,
    Query(params): Query<SettingsParams>,
) -> Html<String> {
    let body = format!(
        r#"<section class="auth-form">
            <h2>Settings</h2>
            <form method="post" action="/settings">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" value="{username}">
                <label for="password">New password (leave blank to keep current)</label>
                <input type="password" id="password" name="password">
                <button type="submit" class="btn">Save</button>
            </form>
        </section>"#,
        username = escape_html(&user.username),
    );

    Html(page(
        "Settings",
        Some(&user.username),
        &flash_banner(params.flash.as_deref()),
        &body,
    ))
}

/// POST /settings
///
/// Username change: case-insensitive collision check against all other
/// users, stored lower-cased. Password change: unconditional rehash
/// when supplied. The two writes are separate transactions.
pub async fn settings_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<SettingsForm>,
) -> ApiResult<Response> {
    let new_name = form.username.trim().to_lowercase();

    if !new_name.is_empty() && new_name != user.username.to_lowercase() {
        if crate::db::users::username_taken_ci(&state.db, &new_name, Some(&user.guid)).await? {
            return Ok(Redirect::to("/settings?flash=username_taken").into_response());
        }
        crate::db::users::update_username(&state.db, &user.guid, &new_name).await?;
        info!("User {} renamed to {}", user.username, new_name);
    }

    if !form.password.is_empty() {
        let password_hash = hash_password(&form.password)?;
        crate::db::users::update_password(&state.db, &user.guid, &password_hash).await?;
        info!("User {} changed password", user.username);
    }

    Ok(Redirect::to("/settings?flash=settings_saved").into_response())
}
