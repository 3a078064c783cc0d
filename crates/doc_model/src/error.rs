//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Cannot add {element} in {container}")]
    InvalidNesting {
        element: &'static str,
        container: &'static str,
    },

    #[error("Invalid comment anchor: {0}")]
    InvalidAnchor(String),

    #[error("Invalid value for {property}: {value}")]
    InvalidStyleValue {
        property: &'static str,
        value: String,
    },

    #[error("Invalid image source: {0}")]
    InvalidImage(String),

    #[error("Invalid object source: {0}")]
    InvalidObjectSource(String),

    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
