//! Shared SQLite database access

pub mod init;
pub mod migrations;
pub mod models;

pub use init::{init_database, init_schema};
