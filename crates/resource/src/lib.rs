//! Native collaborators for the Quizzer engine.
//!
//! This crate provides filesystem-backed implementations of the contracts
//! in quizzer-traits, plus the results archive.
//!
//! ## Available Implementations
//!
//! - [`FilesystemComparer`]: byte-for-byte comparison of two files on disk
//! - [`SystemClock`]: local wall-clock time and the OS user name
//! - [`zip_results`]: archives a results folder into a single `.zip`
//!
//! ## Re-exports
//!
//! For convenience, the in-memory implementations from quizzer-traits:
//! - [`InMemoryFileComparer`], [`InMemoryLabelMapInspector`]

mod archive;
mod clock;
mod filesystem;

pub use archive::{ArchiveError, zip_results};
pub use clock::SystemClock;
pub use filesystem::FilesystemComparer;

pub use quizzer_traits::{InMemoryFileComparer, InMemoryLabelMapInspector};
