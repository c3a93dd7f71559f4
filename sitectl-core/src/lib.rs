//! sitectl-core: storage-agnostic pieces of the site content backend
//!
//! Slugs, wire models, the news merge resolver, and the jobs board.

pub mod auth;
pub mod builtin;
pub mod config;
pub mod error;
pub mod jobs;
pub mod merge;
pub mod models;
pub mod slug;

pub use auth::{CredentialVerifier, StaticCredentials};
pub use builtin::builtin_news;
pub use config::SiteConfig;
pub use error::{CoreError, Result};
pub use jobs::{CountryGroup, JobBoard};
pub use merge::{merge_news, NewsCatalog, PageMetadata};
pub use models::{Job, NewsItem, Tags, Visa, VisaKind};
pub use slug::slugify;
