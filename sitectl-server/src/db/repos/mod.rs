//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per write, no check-then-insert
//! - Slug uniqueness comes from the UNIQUE constraint; violations are `Conflict`
//! - Zero affected rows on update/delete is `NotFound`

pub mod jobs;
pub mod news;
pub mod visas;

pub use jobs::JobRepo;
pub use news::NewsRepo;
pub use visas::VisaRepo;
