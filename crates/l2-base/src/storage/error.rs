use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found at {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid data name '{name}': must be a relative path without '..'")]
    InvalidName { name: String },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound && operation == "reading" {
            return Self::NotFound { path };
        }
        Self::Io { operation, path, source }
    }

    /// Absence of a record is a normal condition; callers use this to default.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
