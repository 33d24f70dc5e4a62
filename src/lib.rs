//! # quizzer
//!
//! Navigation, page-completion tracking and results journaling for image
//! annotation quizzes.
//!
//! A quiz is an XML document of pages, each showing images and asking
//! question sets. The same document accumulates the user's responses,
//! labelmap and markup-line paths as the quiz is taken.
//!
//! ```no_run
//! use std::sync::Arc;
//! use quizzer::{SessionBuilder, SystemClock};
//!
//! # fn main() -> Result<(), quizzer::QuizError> {
//! let mut session = SessionBuilder::new()
//!     .with_document_file("quiz.xml")
//!     .with_clock(Arc::new(SystemClock))
//!     .build()?;
//! session.start()?;
//! # Ok(())
//! # }
//! ```

pub use quizzer_core::*;

pub use quizzer_resource::{ArchiveError, FilesystemComparer, SystemClock, zip_results};
pub use quizzer_traits::{
    FileComparer, FixedClock, FixedRetryPrompt, InMemoryFileComparer, InMemoryLabelMapInspector,
    InspectionError, LabelMapInspector, LabelMapStatistics, RetryPrompt, SessionClock,
};
