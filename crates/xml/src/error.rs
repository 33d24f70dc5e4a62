use std::path::PathBuf;
use thiserror::Error;

use crate::NodeId;

/// Errors raised by the document store.
///
/// The first three variants are the distinct ways opening a document can
/// fail; all of them mean the session cannot safely continue.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("XML parsing error in '{source_name}': {message}")]
    Parse { source_name: String, message: String },

    #[error("Unexpected root element '{found}', expected '{expected}'")]
    RootMismatch { expected: String, found: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML serialization error: {0}")]
    Write(String),

    #[error("Invalid node {node}: {message}")]
    InvalidNode { node: NodeId, message: String },
}

impl XmlError {
    pub(crate) fn invalid(node: NodeId, message: impl Into<String>) -> Self {
        XmlError::InvalidNode {
            node,
            message: message.into(),
        }
    }
}
