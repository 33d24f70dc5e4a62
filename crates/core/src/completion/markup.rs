//! Markup-line axis of page completion.

use quizzer_types::MarkupLineMode;
use quizzer_xml::{Document, NodeId};

use crate::tags::{self, attr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMarkupLines {
    pub image: NodeId,
    /// `MinMarkupLinesRequired`; `None` when absent or not a number.
    pub minimum: Option<u32>,
    /// Number of `MarkupLinePath` children.
    pub count: usize,
}

fn parse_minimum(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok())
}

pub(crate) fn count_lines(doc: &Document, image: NodeId) -> usize {
    doc.child_count(image, tags::MARKUP_LINE_PATH)
}

/// Reads the per-image minimums, current counts, page minimum and mode.
pub(crate) fn read_markup_lines(
    doc: &Document,
    page: NodeId,
) -> (MarkupLineMode, Option<u32>, Vec<ImageMarkupLines>) {
    let images: Vec<ImageMarkupLines> = doc
        .children_iter(page, tags::IMAGE)
        .map(|image| ImageMarkupLines {
            image,
            minimum: parse_minimum(doc.attribute(image, attr::MIN_MARKUP_LINES_REQUIRED)),
            count: count_lines(doc, image),
        })
        .collect();

    let page_minimum = parse_minimum(doc.attribute(page, attr::MIN_MARKUP_LINES_REQUIRED_ON_ANY_IMAGE));
    let mode = if images.iter().any(|i| i.minimum.is_some()) {
        MarkupLineMode::SpecificLinesReq
    } else if page_minimum.is_some() {
        MarkupLineMode::AnyLinesReq
    } else {
        MarkupLineMode::NoLinesReq
    };
    (mode, page_minimum, images)
}

/// Any: one image alone must reach the page minimum; counts are not summed.
/// Specific: every image that names a minimum must reach it.
pub(crate) fn markup_lines_complete(
    mode: MarkupLineMode,
    page_minimum: Option<u32>,
    images: &[ImageMarkupLines],
) -> bool {
    match mode {
        MarkupLineMode::NoLinesReq => true,
        MarkupLineMode::AnyLinesReq => {
            let minimum = page_minimum.unwrap_or(0) as usize;
            images.iter().any(|i| i.count >= minimum)
        }
        MarkupLineMode::SpecificLinesReq => images
            .iter()
            .all(|i| i.count >= i.minimum.unwrap_or(0) as usize),
    }
}
