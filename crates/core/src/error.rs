//! Error and warning types for quiz operations.
//!
//! Integrity problems are `QuizError`s and end the current user action.
//! Recoverable oddities in the document are `ValidationWarning`s: they are
//! logged and handed back, and processing continues with the first
//! matching element.

use quizzer_xml::{NodeId, XmlError};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Document error: {0}")]
    Document(#[from] XmlError),

    #[error("Cannot repeat page '{page_id}': {message}")]
    Repetition { page_id: String, message: String },

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Question set {index} does not exist (page has {count})")]
    QuestionSetOutOfRange { index: usize, count: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Results file '{path}' is still locked after {attempts} attempt(s)")]
    ResultsLocked { path: String, attempts: usize },
}

/// More than one child where the schema allows one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub parent: NodeId,
    pub tag: String,
    pub count: usize,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} <{}> elements under {} where one was expected; using the first",
            self.count, self.tag, self.parent
        )
    }
}
