//! Shared HTML shell and flash banner rendering

use marquee_common::db::models::Movie;

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a flash banner for a known flash code; unknown codes render nothing
pub fn flash_banner(code: Option<&str>) -> String {
    let (class, message) = match code {
        Some("login_required") => ("info", "Please log in to access this page."),
        Some("login_success") => ("success", "Login successful!"),
        Some("logged_out") => ("info", "You have been logged out."),
        Some("welcome") => ("success", "Account created. Welcome!"),
        Some("liked") => ("success", "Added to your likes."),
        Some("already_liked") => ("info", "Already in your likes."),
        Some("review_added") => ("success", "Review submitted."),
        Some("rating_invalid") => ("danger", "Rating must be between 1 and 10."),
        Some("username_taken") => ("danger", "That username is already taken."),
        Some("settings_saved") => ("success", "Settings updated."),
        Some("search_failed") => (
            "danger",
            "Movie search is unavailable right now. Try again later.",
        ),
        _ => return String::new(),
    };

    format!(r#"<div class="flash flash-{}">{}</div>"#, class, message)
}

/// Render an inline banner with arbitrary text (login failures etc.)
pub fn inline_banner(class: &str, message: &str) -> String {
    format!(
        r#"<div class="flash flash-{}">{}</div>"#,
        class,
        escape_html(message)
    )
}

/// Render a full page in the application shell
pub fn page(title: &str, user: Option<&str>, flash_html: &str, body: &str) -> String {
    let nav = match user {
        Some(username) => format!(
            r#"<a href="/homepage">Homepage</a>
            <a href="/dashboard">Dashboard</a>
            <a href="/settings">Settings</a>
            <a href="/logout">Logout</a>
            <span class="nav-user">Signed in as {}</span>"#,
            escape_html(username)
        ),
        None => r#"<a href="/">Log in</a>
            <a href="/signup">Sign up</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Marquee</title>
    <link rel="stylesheet" href="/static/marquee.css">
</head>
<body>
    <header>
        <div class="header-content">
            <h1>Marquee</h1>
            <nav>{nav}</nav>
            <button id="toggle-dark-mode">Dark Mode</button>
        </div>
    </header>
    <main class="container">
        {flash_html}
        {body}
    </main>
    <script src="/static/dark-mode.js"></script>
</body>
</html>"#,
        title = escape_html(title),
        nav = nav,
        flash_html = flash_html,
        body = body,
    )
}

/// Render a grid of movie cards
///
/// `likeable` adds the AJAX like button; `removable` adds the AJAX
/// remove button (dashboard).
pub fn movie_cards(movies: &[Movie], likeable: bool, removable: bool) -> String {
    let mut cards = String::new();
    for movie in movies {
        let poster = match &movie.poster_path {
            Some(path) => format!(
                r#"<img src="https://image.tmdb.org/t/p/w500{}" alt="{} poster">"#,
                escape_html(path),
                escape_html(&movie.title)
            ),
            None => r#"<div class="poster-placeholder"></div>"#.to_string(),
        };

        let overview = movie
            .overview
            .as_deref()
            .map(truncate_overview)
            .unwrap_or_default();

        let like_button = if likeable {
            format!(
                r#"<button class="like-button" data-movie-id="{}">Like</button>"#,
                movie.id
            )
        } else {
            String::new()
        };
        let remove_button = if removable {
            format!(
                r#"<button class="remove-like-button" data-movie-id="{}">Remove</button>"#,
                movie.id
            )
        } else {
            String::new()
        };

        cards.push_str(&format!(
            r#"<div class="card">
                {poster}
                <div class="card-body">
                    <h2 class="card-title">{title}</h2>
                    <p class="card-text">{overview}</p>
                    <a href="/movie/{id}" class="btn">View Details</a>
                    {like_button}{remove_button}
                </div>
            </div>"#,
            poster = poster,
            title = escape_html(&movie.title),
            overview = escape_html(&overview),
            id = movie.id,
            like_button = like_button,
            remove_button = remove_button,
        ));
    }

    format!(r#"<div class="movie-grid" id="movies-container">{}</div>"#, cards)
}

fn truncate_overview(text: &str) -> String {
    const MAX_CHARS: usize = 150;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
    }

    #[test]
    fn flash_banner_ignores_unknown_codes() {
        assert!(flash_banner(Some("nonsense")).is_empty());
        assert!(flash_banner(None).is_empty());
        assert!(flash_banner(Some("welcome")).contains("flash-success"));
    }

    #[test]
    fn truncate_overview_respects_char_boundaries() {
        let long = "é".repeat(200);
        let truncated = truncate_overview(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 153);
    }
}
