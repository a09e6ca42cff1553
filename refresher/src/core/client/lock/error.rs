use crate::core::client::database::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Invalid lock key: {0:?}")]
    InvalidKey(String),
}

impl From<mongodb::error::Error> for LockError {
    fn from(err: mongodb::error::Error) -> Self {
        LockError::DatabaseError(err.into())
    }
}
