//! Session-based authentication
//!
//! Passwords are stored through bcrypt (one-way, salted). A successful
//! login inserts a row into the sessions table and hands the token to
//! the browser in an HttpOnly cookie; the [`CurrentUser`] extractor
//! resolves that cookie back to a user on every protected route.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "marquee_session";

/// Hash a password for storage
pub fn hash_password(password: &str) -> ApiResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored bcrypt hash
///
/// A malformed stored hash counts as a mismatch, matching the generic
/// login failure path.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// Create a session for the user and return the token
///
/// Session lifetime comes from the `session_timeout_seconds` setting.
pub async fn create_session(pool: &SqlitePool, user_guid: &str) -> ApiResult<String> {
    let timeout_seconds = crate::db::settings::get_session_timeout_seconds(pool).await?;
    let token = Uuid::new_v4().to_string();
    let expires_at = (Utc::now() + Duration::seconds(timeout_seconds)).to_rfc3339();

    crate::db::sessions::insert_session(pool, &token, user_guid, &expires_at).await?;

    Ok(token)
}

/// Set-Cookie value establishing the session
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// Set-Cookie value tearing the session down
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Extract the session token from a Cookie header value
pub fn session_token_from_cookies(cookies: &str) -> Option<&str> {
    cookies.split(';').find_map(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) if name == SESSION_COOKIE && !value.is_empty() => {
                Some(value)
            }
            _ => None,
        }
    })
}

/// The authenticated principal for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub guid: String,
    pub username: String,
}

/// Rejection for unauthenticated requests: redirect to the login page,
/// carrying the originally requested path as the post-login target.
#[derive(Debug)]
pub struct AuthRedirect {
    next: String,
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&format!("/?flash=login_required&next={}", self.next)).into_response()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let next = parts.uri.path().to_string();

        let token = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(session_token_from_cookies)
            .ok_or_else(|| AuthRedirect { next: next.clone() })?;

        let session = crate::db::sessions::get_session_user(&state.db, token)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AuthRedirect { next: next.clone() })?;

        let expired = chrono::DateTime::parse_from_rfc3339(&session.expires_at)
            .map(|expiry| expiry.with_timezone(&Utc) <= Utc::now())
            .unwrap_or(true);
        if expired {
            debug!("Session {} expired, discarding", token);
            let _ = crate::db::sessions::delete_session(&state.db, token).await;
            return Err(AuthRedirect { next });
        }

        Ok(CurrentUser {
            guid: session.user_guid,
            username: session.username,
        })
    }
}
