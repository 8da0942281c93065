//! Database access for marquee-web
//!
//! One module per table, raw queries against the shared SQLite pool.
//! Schema creation lives in marquee-common.

pub mod likes;
pub mod movies;
pub mod reviews;
pub mod sessions;
pub mod settings;
pub mod users;
