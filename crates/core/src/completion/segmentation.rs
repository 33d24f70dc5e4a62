//! Segmentation axis of page completion.

use quizzer_traits::{FileComparer, InspectionError, LabelMapInspector};
use quizzer_types::{ImageLayer, ImageType, NavigationEntry, SegmentationMode, SegmentationRequirement};
use quizzer_xml::{Document, NodeId};

use crate::error::ValidationWarning;
use crate::history::find_labelmap_source;
use crate::journal::{get_latest_child_element, single_child};
use crate::tags::{self, attr};

/// Per-image segmentation requirement and whether it is currently met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSegmentation {
    pub image: NodeId,
    pub requirement: SegmentationRequirement,
    pub completed: bool,
}

/// What is known about an image's latest labelmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelMapEvidence {
    /// A `LabelMapPath` is recorded and the file could be read.
    pub exists: bool,
    /// The labelmap has a non-zero minimum or maximum.
    pub non_zero: bool,
    /// The image was seeded from an earlier page's labelmap.
    pub redisplayed: bool,
    /// The labelmap differs byte-for-byte from the one it was seeded from.
    pub modified: bool,
}

/// Everything the labelmap test needs beyond the page itself.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    pub doc: &'a Document,
    pub navigation: &'a [NavigationEntry],
    pub current_index: usize,
    pub inspector: &'a dyn LabelMapInspector,
    pub comparer: &'a dyn FileComparer,
    pub timestamp_format: &'a str,
}

/// Whether one image's labelmap counts as a finished segmentation.
///
/// | mode     | rule                                                       |
/// |----------|------------------------------------------------------------|
/// | None     | exists                                                     |
/// | Any      | exists and non-zero                                        |
/// | Specific | exists and non-zero, and modified if required + redisplayed |
pub fn labelmap_satisfies(
    mode: SegmentationMode,
    requirement: SegmentationRequirement,
    evidence: LabelMapEvidence,
) -> bool {
    if !evidence.exists {
        return false;
    }
    match mode {
        SegmentationMode::None => true,
        SegmentationMode::Any => evidence.non_zero,
        SegmentationMode::Specific => {
            if requirement == SegmentationRequirement::Required && evidence.redisplayed {
                evidence.non_zero && evidence.modified
            } else {
                evidence.non_zero
            }
        }
    }
}

pub(crate) fn image_layer(
    doc: &Document,
    image: NodeId,
    warnings: &mut Vec<ValidationWarning>,
) -> Option<ImageLayer> {
    let (layer, warning) = single_child(doc, image, tags::LAYER);
    warnings.extend(warning);
    let text = doc.text(layer?)?;
    match text.parse::<ImageLayer>() {
        Ok(layer) => Some(layer),
        Err(e) => {
            log::warn!("Image '{}': {}", doc.attribute_or_empty(image, attr::ID), e);
            None
        }
    }
}

/// The parsed `Type` of an image; `None` when absent or unknown.
pub(crate) fn image_type(doc: &Document, image: NodeId) -> Option<ImageType> {
    let text = doc.attribute(image, attr::TYPE)?;
    match text.parse::<ImageType>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            log::warn!("Image '{}': {}", doc.attribute_or_empty(image, attr::ID), e);
            None
        }
    }
}

/// Reads the requirement of every image and the resulting page mode.
pub(crate) fn read_segmentation(
    doc: &Document,
    page: NodeId,
    warnings: &mut Vec<ValidationWarning>,
) -> (SegmentationMode, Vec<ImageSegmentation>) {
    let mut images = Vec::new();
    let mut any_specific = false;

    for image in doc.children_iter(page, tags::IMAGE) {
        let requirement = if image_layer(doc, image, warnings).is_some_and(|l| l.is_annotation_target()) {
            SegmentationRequirement::NotApplicable
        } else if tags::is_yes(doc.attribute(image, attr::SEGMENT_REQUIRED)) {
            if let Some(kind) = image_type(doc, image).filter(|k| k.is_annotation()) {
                log::warn!(
                    "Image '{}' of type {:?} is marked SegmentRequired",
                    doc.attribute_or_empty(image, attr::ID),
                    kind
                );
            }
            any_specific = true;
            SegmentationRequirement::Required
        } else {
            SegmentationRequirement::NotRequired
        };
        images.push(ImageSegmentation {
            image,
            requirement,
            completed: false,
        });
    }

    let mode = if any_specific {
        SegmentationMode::Specific
    } else if tags::is_yes(doc.attribute(page, attr::SEGMENT_REQUIRED_ON_ANY_IMAGE)) {
        SegmentationMode::Any
    } else {
        SegmentationMode::None
    };
    (mode, images)
}

/// Page-level aggregate over the per-image flags.
pub(crate) fn segmentations_complete(mode: SegmentationMode, images: &[ImageSegmentation]) -> bool {
    match mode {
        SegmentationMode::None => true,
        SegmentationMode::Any => images
            .iter()
            .any(|i| i.requirement != SegmentationRequirement::NotApplicable && i.completed),
        SegmentationMode::Specific => images
            .iter()
            .filter(|i| i.requirement.blocks_completion())
            .all(|i| i.completed),
    }
}

fn latest_labelmap_path<'a>(doc: &'a Document, image: NodeId, format: &str) -> Option<&'a str> {
    get_latest_child_element(doc, image, tags::LABEL_MAP_PATH, format)
        .and_then(|node| doc.text(node))
        .map(str::trim)
        .filter(|path| !path.is_empty())
}

/// Collects the evidence for one image, touching the filesystem only as
/// far as `mode` and `requirement` need.
pub(crate) fn gather_evidence(
    ctx: &CompletionContext<'_>,
    mode: SegmentationMode,
    segmentation: &ImageSegmentation,
) -> LabelMapEvidence {
    let doc = ctx.doc;
    let image = segmentation.image;
    let mut evidence = LabelMapEvidence::default();

    let Some(path) = latest_labelmap_path(doc, image, ctx.timestamp_format) else {
        return evidence;
    };

    match ctx.inspector.statistics(path) {
        Ok(stats) => {
            evidence.exists = true;
            evidence.non_zero = stats.has_content();
        }
        Err(InspectionError::NotFound(_)) => {
            log::debug!("Labelmap '{}' is recorded but missing on disk", path);
            return evidence;
        }
        Err(e) => {
            log::warn!("Cannot inspect labelmap '{}' with {}: {}", path, ctx.inspector.name(), e);
            return evidence;
        }
    }

    let needs_history = mode == SegmentationMode::Specific
        && segmentation.requirement == SegmentationRequirement::Required;
    if !needs_history {
        return evidence;
    }
    let Some(link) = doc.attribute(image, attr::DISPLAY_LABEL_MAP_ID) else {
        return evidence;
    };

    let source = find_labelmap_source(doc, ctx.navigation, ctx.current_index, link)
        .and_then(|hit| latest_labelmap_path(doc, hit.element, ctx.timestamp_format));
    let Some(source_path) = source else {
        log::warn!(
            "Image '{}' redisplays labelmap '{}' but no earlier page provides it",
            doc.attribute_or_empty(image, attr::ID),
            link
        );
        return evidence;
    };

    evidence.redisplayed = true;
    evidence.modified = match ctx.comparer.identical(path, source_path) {
        Ok(identical) => !identical,
        Err(e) => {
            log::warn!(
                "Cannot compare '{}' with '{}' using {}: {}",
                path,
                source_path,
                ctx.comparer.name(),
                e
            );
            false
        }
    };
    evidence
}
