//! # quizzer-xml
//!
//! The document store behind a quiz session. One XML file is both the quiz
//! definition and the growing results log, so the store is a mutable tree
//! rather than a read-only view:
//! - **document**: the arena tree, typed accessors and in-place mutation
//! - **parse**: loading a file or string through `roxmltree`
//! - **write**: tab-indented serialization through `quick-xml`
//! - **error**: the integrity errors callers must surface to the user
//!
//! The store never persists on its own. Callers decide when a mutation is
//! durable by calling [`Document::save_xml`].

mod document;
mod error;
mod parse;
mod write;

pub use document::{Document, NodeId};
pub use error::XmlError;
