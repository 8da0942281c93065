//! Login page

use axum::response::Html;

use super::layout::{escape_html, flash_banner, inline_banner, page};

/// Render the login page with an optional inline error message
pub fn render_login_page(error: Option<&str>, next: Option<&str>) -> Html<String> {
    let banner = error
        .map(|message| inline_banner("danger", message))
        .unwrap_or_default();
    render(banner, next)
}

/// Render the login page with a flash-code banner
pub fn render_login_page_with_flash(flash: Option<&str>, next: Option<&str>) -> Html<String> {
    render(flash_banner(flash), next)
}

fn render(banner: String, next: Option<&str>) -> Html<String> {
    let next_field = next
        .map(|target| {
            format!(
                r#"<input type="hidden" name="next" value="{}">"#,
                escape_html(target)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<section class="auth-form">
            <h2>Log in</h2>
            <form method="post" action="/">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" required>
                <label for="password">Password</label>
                <input type="password" id="password" name="password" required>
                {next_field}
                <button type="submit" class="btn">Login</button>
            </form>
            <p>No account yet? <a href="/signup">Sign up</a>.</p>
        </section>"#,
        next_field = next_field,
    );

    Html(page("Log in", None, &banner, &body))
}
