//! Wire models shared by the server and the admin client
//!
//! JSON uses camelCase field names. With the `sqlx` feature enabled the
//! same types decode straight from store rows.

pub mod de;
pub mod job;
pub mod news;
pub mod visa;

pub use job::{Job, Tags};
pub use news::NewsItem;
pub use visa::{Visa, VisaKind};
