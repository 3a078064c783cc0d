//! Error types for DOCX export

use thiserror::Error;

/// Errors that can occur while writing a DOCX package
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document model error
    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    /// A writer asked for a part the relationship index never registered
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Relationship with an empty type or target
    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// The document has no sections to serialize
    #[error("Document has no sections")]
    EmptyDocument,
}

/// Result alias for DOCX export operations
pub type DocxResult<T> = Result<T, DocxError>;
