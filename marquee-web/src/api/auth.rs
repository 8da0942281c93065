//! Login, signup, and logout
//!
//! Login failures are deliberately generic: an unknown username and a
//! wrong password produce the same message.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::ui::{login, signup};
use crate::auth::{
    clear_session_cookie, create_session, hash_password, session_cookie,
    session_token_from_cookies, verify_password, CurrentUser,
};
use crate::{ApiError, ApiResult, AppState};

/// Query parameters shared by the login and signup pages
#[derive(Debug, Deserialize)]
pub struct AuthPageParams {
    pub flash: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    username: String,
    password: String,
}

/// Only accept same-site paths as post-login targets
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/homepage",
    }
}

/// Redirect carrying a Set-Cookie header
fn redirect_with_cookie(target: &str, cookie: &str) -> ApiResult<Response> {
    let mut response = Redirect::to(target).into_response();
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

/// POST /
///
/// Form login. Honors the `next` target from the original request.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let user = crate::db::users::get_user_by_username_ci(&state.db, &form.username).await?;

    let user = match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => user,
        // Same message whether the user is unknown or the password is wrong
        _ => {
            return Ok(login::render_login_page(
                Some("Login failed. Check username and password."),
                form.next.as_deref(),
            )
            .into_response())
        }
    };

    let token = create_session(&state.db, &user.guid).await?;
    info!("User {} logged in", user.username);

    let target = format!("{}?flash=login_success", safe_next(form.next.as_deref()));
    redirect_with_cookie(&target, &session_cookie(&token))
}

/// POST /signup
///
/// Fails when a case-insensitive username match exists; otherwise stores
/// the user and establishes a session immediately.
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> ApiResult<Response> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Ok(signup::render_signup_page(Some("Username and password are required."))
            .into_response());
    }

    if crate::db::users::username_taken_ci(&state.db, username, None).await? {
        return Ok(
            signup::render_signup_page(Some("That username is already taken.")).into_response(),
        );
    }

    let guid = Uuid::new_v4().to_string();
    let password_hash = hash_password(&form.password)?;
    crate::db::users::insert_user(&state.db, &guid, username, &password_hash).await?;
    info!("New user {} signed up", username);

    let token = create_session(&state.db, &guid).await?;
    redirect_with_cookie("/homepage?flash=welcome", &session_cookie(&token))
}

/// GET /logout
///
/// Tears down the current session unconditionally.
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(session_token_from_cookies);

    if let Some(token) = token {
        crate::db::sessions::delete_session(&state.db, token).await?;
    }
    info!("User {} logged out", user.username);

    redirect_with_cookie("/?flash=logged_out", &clear_session_cookie())
}

/// GET /
///
/// Login page; already-authenticated users go straight to the homepage.
pub async fn login_page(
    user: Option<CurrentUser>,
    Query(params): Query<AuthPageParams>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/homepage").into_response();
    }
    login::render_login_page_with_flash(params.flash.as_deref(), params.next.as_deref())
        .into_response()
}

/// GET /signup
pub async fn signup_page(user: Option<CurrentUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/homepage").into_response();
    }
    signup::render_signup_page(None).into_response()
}

/// Build login/signup/logout routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login_submit))
        .route("/signup", get(signup_page).post(signup_submit))
        .route("/logout", get(logout))
}
