use mongodb::bson;
use thiserror::Error;

use super::constant::DUPLICATE_KEY_ERROR_CODE;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Failed to serialize document: {0}")]
    SerializationError(#[from] bson::ser::Error),

    #[error("Failed to deserialize document: {0}")]
    DeserializationError(#[from] bson::de::Error),
}

impl DatabaseError {
    /// True when the server rejected a write because of a unique index.
    pub fn is_duplicate_key(&self) -> bool {
        use mongodb::error::{ErrorKind, WriteFailure};
        match self {
            DatabaseError::MongoError(err) => match err.kind.as_ref() {
                ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_ERROR_CODE,
                ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_ERROR_CODE,
                _ => false,
            },
            _ => false,
        }
    }
}
