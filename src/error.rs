//! Error types for property extraction.

use thiserror::Error;

/// Result type for property extraction operations.
pub type Result<T> = std::result::Result<T, DocPropsError>;

/// Error types for property extraction operations.
#[derive(Error, Debug)]
pub enum DocPropsError {
    /// Package file not found at the given path
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// ZIP archive error (corrupt archive or unreadable entry)
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for DocPropsError {
    fn from(err: quick_xml::Error) -> Self {
        DocPropsError::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for DocPropsError {
    fn from(err: zip::result::ZipError) -> Self {
        DocPropsError::Zip(err.to_string())
    }
}
