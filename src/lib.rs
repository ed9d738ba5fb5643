//! chores-api - read-only HTTP API over a chores database.
//!
//! Callers authenticate with a static `X-API-Key` header and can list
//! chores, filter them by assignee and date, and list known names.

pub mod config;
pub mod db;
pub mod error;
pub mod http;

pub use config::Config;
pub use db::{ChoreStore, PgStore};
pub use http::{AppState, router, run_http_server};
