//! Route handlers organized by resource

pub mod health;
pub mod jobs;
pub mod news;
pub mod upload;
pub mod visas;

use serde::Serialize;

/// Body returned by every create, update and delete.
#[derive(Debug, Serialize)]
pub struct Mutation<T = ()> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Mutation<T> {
    pub fn with_data(message: impl Into<String>, id: Option<i64>, data: T) -> Self {
        Self {
            message: message.into(),
            id,
            data: Some(data),
        }
    }
}

impl Mutation {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
            data: None,
        }
    }
}
