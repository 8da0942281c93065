//! Signup page

use axum::response::Html;

use super::layout::{inline_banner, page};

/// Render the signup page with an optional inline error message
pub fn render_signup_page(error: Option<&str>) -> Html<String> {
    let banner = error
        .map(|message| inline_banner("danger", message))
        .unwrap_or_default();

    let body = r#"<section class="auth-form">
            <h2>Sign up</h2>
            <form method="post" action="/signup">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" required>
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required>
                <button type="submit" class="btn">Sign up</button>
            </form>
            <p>Already have an account? <a href="/">Log in</a>.</p>
        </section>"#;

    Html(page("Sign up", None, &banner, body))
}
