//! Database layer - connection pool, migrations and repositories
//!
//! - One pool created at startup and passed around explicitly
//! - Schema changes are versioned migrations applied before serving
//! - Uniqueness is left to table constraints; violations map to `Conflict`
//! - Every write is a single statement

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_memory_pool, create_pool, create_pool_with_options, open_pool};
pub use repos::*;
