use crate::core::client::database::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacklogError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Failed to decode pending request: {0}")]
    InvalidRequest(String),
}

impl From<mongodb::error::Error> for BacklogError {
    fn from(err: mongodb::error::Error) -> Self {
        BacklogError::DatabaseError(err.into())
    }
}
