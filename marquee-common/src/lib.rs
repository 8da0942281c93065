//! Shared foundation for the Marquee web application
//!
//! Holds the pieces both the web binary and its tests need: the common
//! error type, configuration resolution, and SQLite schema management.

pub mod config;
pub mod db;
pub mod error;

pub use crate::error::{Error, Result};
