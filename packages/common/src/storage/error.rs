use std::fmt;

use crate::document::DocumentError;

/// Errors that can occur while reading or writing game state.
#[derive(Debug)]
pub enum StorageError {
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The persisted document could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// A document was refused because it is inconsistent.
    InvalidDocument(DocumentError),
    /// The relational backend reported an error.
    Database(String),
    /// The requested backend is not available in this build.
    Unsupported(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::Serialization(err) => write!(f, "corrupt game document: {err}"),
            Self::InvalidDocument(err) => write!(f, "invalid game document: {err}"),
            Self::Database(msg) => write!(f, "database error: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported storage backend: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidDocument(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<DocumentError> for StorageError {
    fn from(err: DocumentError) -> Self {
        Self::InvalidDocument(err)
    }
}

#[cfg(feature = "sea-orm")]
impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}
