//! Contracts for inspecting annotation files written by the host viewer.
//!
//! The engine never decodes images. Segmentation completion only needs two
//! facts about a labelmap file: whether any voxel is labelled, and whether
//! the file still matches the historical labelmap it was seeded from.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for collaborator inspection operations.
#[derive(Error, Debug, Clone)]
pub enum InspectionError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for InspectionError {
    fn from(err: std::io::Error) -> Self {
        InspectionError::Io(err.to_string())
    }
}

/// Minimum and maximum voxel value of a labelmap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelMapStatistics {
    pub min: f64,
    pub max: f64,
}

impl LabelMapStatistics {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A labelmap whose min and max are both zero holds no labels.
    pub fn has_content(&self) -> bool {
        !(self.min == 0.0 && self.max == 0.0)
    }
}

/// Loads pixel statistics for a labelmap file. Provided by the host.
pub trait LabelMapInspector: Debug {
    fn statistics(&self, path: &str) -> Result<LabelMapStatistics, InspectionError>;

    /// Returns a human-readable name for this inspector (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Compares two files byte for byte.
pub trait FileComparer: Debug {
    fn identical(&self, left: &str, right: &str) -> Result<bool, InspectionError>;

    fn name(&self) -> &'static str;
}

/// Labelmap statistics registered ahead of time.
///
/// Used by tests and by hosts that compute statistics while saving.
#[derive(Debug, Default)]
pub struct InMemoryLabelMapInspector {
    stats: RwLock<HashMap<String, LabelMapStatistics>>,
}

impl InMemoryLabelMapInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers statistics for a path, replacing earlier ones.
    pub fn insert(&self, path: impl Into<String>, stats: LabelMapStatistics) {
        if let Ok(mut map) = self.stats.write() {
            map.insert(path.into(), stats);
        }
    }
}

impl LabelMapInspector for InMemoryLabelMapInspector {
    fn statistics(&self, path: &str) -> Result<LabelMapStatistics, InspectionError> {
        let map = self.stats.read().map_err(|_| InspectionError::Unreadable {
            path: path.to_string(),
            message: "statistics lock poisoned".to_string(),
        })?;
        map.get(path)
            .copied()
            .ok_or_else(|| InspectionError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryLabelMapInspector"
    }
}

/// File contents held in memory and compared directly.
#[derive(Debug, Default)]
pub struct InMemoryFileComparer {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileComparer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, contents: Vec<u8>) {
        if let Ok(mut map) = self.files.write() {
            map.insert(path.into(), contents);
        }
    }
}

impl FileComparer for InMemoryFileComparer {
    fn identical(&self, left: &str, right: &str) -> Result<bool, InspectionError> {
        let files = self.files.read().map_err(|_| InspectionError::Unreadable {
            path: left.to_string(),
            message: "file store lock poisoned".to_string(),
        })?;
        let a = files
            .get(left)
            .ok_or_else(|| InspectionError::NotFound(left.to_string()))?;
        let b = files
            .get(right)
            .ok_or_else(|| InspectionError::NotFound(right.to_string()))?;
        Ok(a == b)
    }

    fn name(&self) -> &'static str {
        "InMemoryFileComparer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_content_detection() {
        assert!(!LabelMapStatistics::new(0.0, 0.0).has_content());
        assert!(LabelMapStatistics::new(0.0, 1.0).has_content());
        assert!(LabelMapStatistics::new(-1.0, 0.0).has_content());
    }

    #[test]
    fn test_in_memory_inspector_lookup() {
        let inspector = InMemoryLabelMapInspector::new();
        inspector.insert("seg.nrrd", LabelMapStatistics::new(0.0, 3.0));

        let stats = inspector.statistics("seg.nrrd").unwrap();
        assert_eq!(stats.max, 3.0);
        assert!(matches!(
            inspector.statistics("missing.nrrd"),
            Err(InspectionError::NotFound(_))
        ));
    }

    #[test]
    fn test_in_memory_comparer() {
        let comparer = InMemoryFileComparer::new();
        comparer.insert("a", vec![1, 2, 3]);
        comparer.insert("b", vec![1, 2, 3]);
        comparer.insert("c", vec![1, 2, 4]);

        assert!(comparer.identical("a", "b").unwrap());
        assert!(!comparer.identical("a", "c").unwrap());
        assert!(comparer.identical("a", "missing").is_err());
    }

    #[test]
    fn test_inspection_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: InspectionError = io_err.into();
        assert!(matches!(err, InspectionError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
