use std::path::PathBuf;

use thiserror::Error;

/// Errors from saving, loading, importing and exporting templates
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to serialize template: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template id: {0:?}")]
    InvalidId(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from reading or decoding an image for an image element
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to read image file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a data URI")]
    NotDataUri,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Remote image URLs are not fetched: {0}")]
    Remote(String),
}
