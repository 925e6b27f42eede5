//! Error types for the company_colors library

use std::path::PathBuf;
use thiserror::Error;

use crate::models::CompanyId;

/// Result type alias for company_colors operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while deriving, rendering or publishing company colors
#[derive(Error, Debug)]
pub enum Error {
    /// Logo bytes could not be decoded into a usable image
    #[error("Failed to decode logo: {message}")]
    ImageDecode {
        /// What went wrong
        message: String,
        /// Underlying decoder error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A template placeholder has no value in the sanitized color set
    #[error("Stylesheet template references unknown key '{key}'")]
    TemplateKey {
        /// Placeholder name
        key: String,
    },

    /// A color slot was given something that is not a hex color
    #[error("Invalid color for slot '{slot}': '{value}'")]
    InvalidColor {
        /// Slot key
        slot: String,
        /// Rejected value
        value: String,
    },

    /// The name does not match any color slot
    #[error("Unknown color slot '{key}'")]
    UnknownSlot {
        /// The unrecognized name
        key: String,
    },

    /// No company exists with the given id
    #[error("Company {id} not found")]
    CompanyNotFound {
        /// Requested id
        id: CompanyId,
    },

    /// The storage collaborator failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Create an image decode error with its underlying cause
    pub fn image_decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageDecode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image decode error without an underlying cause
    pub fn image_decode_msg(message: impl Into<String>) -> Self {
        Self::ImageDecode {
            message: message.into(),
            source: None,
        }
    }
}

/// Failures of the record and attachment stores
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An update targeted a record that does not exist
    #[error("{kind} '{id}' does not exist")]
    Missing {
        /// Record type
        kind: &'static str,
        /// Record id
        id: String,
    },
}

impl StorageError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
