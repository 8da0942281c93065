//! Database models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_guid: String,
    pub expires_at: String,
}

/// A locally mirrored movie record
///
/// `id` is the external API's identifier. `genre_ids` is the comma-joined
/// id list exactly as mirrored; `release_date` is None when the source
/// omitted or mis-formatted it on the listing path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre_ids: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_guid: String,
    pub movie_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_guid: String,
    pub movie_id: i64,
    pub rating: i64,
    pub review_text: Option<String>,
}
