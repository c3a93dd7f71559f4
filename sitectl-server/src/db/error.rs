//! Repository error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },

    #[error("migration {version} ({name}) failed: {source}")]
    Migration {
        version: i64,
        name: &'static str,
        source: sqlx::Error,
    },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Classify a failed insert/update: constraint violations become
    /// `Conflict`, everything else passes through.
    pub fn from_write(resource: &'static str, key: impl ToString, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict {
                resource,
                key: key.to_string(),
            },
            _ => Self::Sqlx(err),
        }
    }
}
