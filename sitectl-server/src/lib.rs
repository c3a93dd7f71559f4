//! sitectl-server: HTTP API for the site content backend
//!
//! Visas, investor visas, jobs and news stored in SQLite, plus an image
//! upload endpoint that returns data URIs.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, migrations, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
