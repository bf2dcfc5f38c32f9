//! Error taxonomy shared by the stores, the service and the HTTP layer.

use crate::libs::messages::Message;
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Missing required field, unparsable date or unusable CPF.
    #[error("{0}")]
    Validation(Message),

    /// No entity with the requested identifier or natural key.
    #[error("{0}")]
    NotFound(Message),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("data file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
