//! Request models and validation
//!
//! Invalid input returns ValidationError, not panic.

pub mod requests;
pub mod validation;

pub use requests::{check_job, check_new_article, check_visa, require_id, IdKey, SlugKey};
pub use validation::ValidationError;
