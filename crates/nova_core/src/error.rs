use thiserror::Error;

use crate::store::StoreError;

/// Domain-level error taxonomy.
///
/// Validation, not-found and referential errors are detected before any
/// mutation, so a caller that receives one can assume the store is untouched.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Referential error: {0}")]
    Referential(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LeagueError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        LeagueError::NotFound { entity, id: id.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LeagueError::Validation(msg.into())
    }

    pub fn referential(msg: impl Into<String>) -> Self {
        LeagueError::Referential(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
