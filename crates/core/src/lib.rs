//! # quizzer-core
//!
//! Navigation and page-completion model for image annotation quizzes.
//!
//! This crate provides the logic between a quiz document and the screens a
//! viewer shows:
//! - **navigation**: the flat list of page/question-set positions, with
//!   page-group randomization
//! - **history**: backward searches over the pages already visited
//! - **completion**: per-page question-set, segmentation and markup-line state
//! - **repetition**: cloning a page for another pass
//! - **journal**: timestamped, append-only responses and paths
//! - **session**: one user's pass through a document, with saving
//!
//! ## Design Principle
//!
//! Apart from opening and saving the results file, this crate has no
//! platform dependencies. Labelmap statistics, file comparison, the clock
//! and retry dialogs come in through the traits of `quizzer-traits`.

// Re-export foundation crates
pub use quizzer_traits as traits;
pub use quizzer_types as types;
pub use quizzer_xml as xml;

pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod journal;
pub mod navigation;
pub mod repetition;
pub mod session;
pub mod tags;

// Re-export commonly used types from foundation crates
pub use types::{
    MarkupLineMode, NavigationEntry, PageId, PageLayout, SegmentationMode, SegmentationRequirement,
    Timestamp,
};
pub use xml::{Document, NodeId, XmlError};

// Re-export from internal modules
pub use completion::{CompletionCheck, CompletionContext, PageState};
pub use config::SessionConfig;
pub use error::{QuizError, ValidationWarning};
pub use journal::{Journal, PathKind, ResponseEvent};
pub use session::{QuizSession, SessionBuilder};
