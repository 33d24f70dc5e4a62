//! Typed codes for the three page-completion axes.
//!
//! Quiz files historically encoded these as bare integers (0, 1, 2 and in
//! places -1 for "not applicable"). The enums below are the only encoding
//! used in memory; nothing here is persisted.

use serde::Serialize;

/// Whether an image must receive a segmentation before its page completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentationRequirement {
    #[default]
    NotRequired,
    Required,
    /// The image is itself a label or segmentation layer.
    NotApplicable,
}

impl SegmentationRequirement {
    pub fn blocks_completion(self) -> bool {
        self == Self::Required
    }
}

/// Page-level segmentation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentationMode {
    #[default]
    None,
    /// `SegmentRequiredOnAnyImage` is set and no image names itself.
    Any,
    /// At least one image sets `SegmentRequired`.
    Specific,
}

/// Page-level markup-line policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MarkupLineMode {
    #[default]
    NoLinesReq,
    AnyLinesReq,
    SpecificLinesReq,
}
