//! Per-page completion state.
//!
//! A [`PageState`] is re-derived from the document each time a page is
//! shown; nothing carries over from the previous page. It tracks three
//! independent axes:
//!
//! - question sets: one flag per set, all set up front when the page is
//!   already marked `PageComplete="Y"`;
//! - segmentations: per-image [`SegmentationRequirement`] plus a completed
//!   flag, under a page-level [`SegmentationMode`];
//! - markup lines: per-image minimum and count under a page-level
//!   [`MarkupLineMode`].
//!
//! Unmet requirements are not errors. They show up as `false` from the
//! `check_*` methods and as text in [`CompletionCheck::message`].

mod markup;
mod segmentation;

pub use markup::ImageMarkupLines;
pub use segmentation::{CompletionContext, ImageSegmentation, LabelMapEvidence, labelmap_satisfies};

use quizzer_types::{MarkupLineMode, SegmentationMode, SegmentationRequirement};
use quizzer_xml::{Document, NodeId};

use crate::error::{QuizError, ValidationWarning};
use crate::tags::{self, attr};

/// Outcome of a completion check, with the reasons the page is blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCheck {
    pub complete: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PageState {
    page: NodeId,
    question_sets: Vec<bool>,
    segmentation_mode: SegmentationMode,
    segmentations: Vec<ImageSegmentation>,
    markup_mode: MarkupLineMode,
    page_markup_minimum: Option<u32>,
    markup_lines: Vec<ImageMarkupLines>,
    warnings: Vec<ValidationWarning>,
}

impl PageState {
    /// Reads all three axes from `page`.
    pub fn initialize(doc: &Document, page: NodeId) -> Self {
        let already_complete = tags::is_yes(doc.attribute(page, attr::PAGE_COMPLETE));
        let question_sets = vec![already_complete; doc.child_count(page, tags::QUESTION_SET)];

        let mut warnings = Vec::new();
        let (segmentation_mode, segmentations) = segmentation::read_segmentation(doc, page, &mut warnings);
        let (markup_mode, page_markup_minimum, markup_lines) = markup::read_markup_lines(doc, page);

        log::debug!(
            "Page '{}': {} question set(s), segmentation {:?}, markup {:?}",
            doc.attribute_or_empty(page, attr::ID),
            question_sets.len(),
            segmentation_mode,
            markup_mode
        );

        Self {
            page,
            question_sets,
            segmentation_mode,
            segmentations,
            markup_mode,
            page_markup_minimum,
            markup_lines,
            warnings,
        }
    }

    pub fn page(&self) -> NodeId {
        self.page
    }

    pub fn question_sets(&self) -> &[bool] {
        &self.question_sets
    }

    pub fn segmentation_mode(&self) -> SegmentationMode {
        self.segmentation_mode
    }

    pub fn segmentations(&self) -> &[ImageSegmentation] {
        &self.segmentations
    }

    pub fn markup_line_mode(&self) -> MarkupLineMode {
        self.markup_mode
    }

    pub fn page_markup_minimum(&self) -> Option<u32> {
        self.page_markup_minimum
    }

    pub fn markup_lines(&self) -> &[ImageMarkupLines] {
        &self.markup_lines
    }

    /// Duplicate-element warnings met while reading the page.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn update_question_set_completion_state(
        &mut self,
        index: usize,
        complete: bool,
    ) -> Result<(), QuizError> {
        let count = self.question_sets.len();
        let flag = self
            .question_sets
            .get_mut(index)
            .ok_or(QuizError::QuestionSetOutOfRange { index, count })?;
        *flag = complete;
        Ok(())
    }

    /// Recomputes every image's completed flag from its latest labelmap.
    pub fn test_labelmaps_completion_state(&mut self, ctx: &CompletionContext<'_>) {
        let mode = self.segmentation_mode;
        for image in &mut self.segmentations {
            let evidence = segmentation::gather_evidence(ctx, mode, image);
            image.completed = labelmap_satisfies(mode, image.requirement, evidence);
            log::trace!("Image {}: {:?} -> completed={}", image.image, evidence, image.completed);
        }
    }

    /// Recounts `MarkupLinePath` children of every image.
    pub fn test_markup_lines_completion_state(&mut self, doc: &Document) {
        for image in &mut self.markup_lines {
            image.count = markup::count_lines(doc, image.image);
        }
    }

    pub fn check_page_completion_level_for_question_sets(&self) -> bool {
        self.question_sets.iter().all(|&complete| complete)
    }

    pub fn check_page_completion_level_for_segmentations(&self) -> bool {
        segmentation::segmentations_complete(self.segmentation_mode, &self.segmentations)
    }

    pub fn check_page_completion_level_for_markup_lines(&self) -> bool {
        markup::markup_lines_complete(self.markup_mode, self.page_markup_minimum, &self.markup_lines)
    }

    pub fn is_page_complete(&self) -> bool {
        self.check_page_completion_level_for_question_sets()
            && self.check_page_completion_level_for_segmentations()
            && self.check_page_completion_level_for_markup_lines()
    }

    /// The completion verdict plus a message listing what is still missing.
    pub fn completion_report(&self, doc: &Document) -> CompletionCheck {
        let mut missing = Vec::new();

        if !self.check_page_completion_level_for_question_sets() {
            let open = self.question_sets.iter().filter(|&&c| !c).count();
            missing.push(format!("{} question set(s) not answered", open));
        }

        if !self.check_page_completion_level_for_segmentations() {
            match self.segmentation_mode {
                SegmentationMode::Any => {
                    missing.push("a segmentation is required on at least one image".to_string())
                }
                _ => {
                    let images = self
                        .segmentations
                        .iter()
                        .filter(|i| i.requirement == SegmentationRequirement::Required && !i.completed)
                        .map(|i| image_name(doc, i.image))
                        .collect::<Vec<_>>();
                    missing.push(format!("segmentation required on: {}", images.join(", ")));
                }
            }
        }

        if !self.check_page_completion_level_for_markup_lines() {
            match self.markup_mode {
                MarkupLineMode::AnyLinesReq => missing.push(format!(
                    "at least {} markup line(s) required on one image",
                    self.page_markup_minimum.unwrap_or(0)
                )),
                _ => {
                    for image in &self.markup_lines {
                        let minimum = image.minimum.unwrap_or(0) as usize;
                        if image.count < minimum {
                            missing.push(format!(
                                "{} of {} markup line(s) on {}",
                                image.count,
                                minimum,
                                image_name(doc, image.image)
                            ));
                        }
                    }
                }
            }
        }

        CompletionCheck {
            complete: missing.is_empty(),
            message: missing.join("\n"),
        }
    }
}

fn image_name(doc: &Document, image: NodeId) -> String {
    match doc.attribute(image, attr::ID) {
        Some(id) => id.to_string(),
        None => format!("image {}", image),
    }
}

/// Writes `PageComplete="Y"` on the page.
pub fn mark_page_complete(doc: &mut Document, page: NodeId) -> Result<(), QuizError> {
    doc.set_attribute(page, attr::PAGE_COMPLETE, "Y")?;
    Ok(())
}

/// Every `Question` in the set has at least one `Option` with a `Response`.
pub fn question_set_answered(doc: &Document, question_set: NodeId) -> bool {
    doc.children_iter(question_set, tags::QUESTION).all(|question| {
        doc.children_iter(question, tags::OPTION)
            .any(|option| doc.child_count(option, tags::RESPONSE) > 0)
    })
}
