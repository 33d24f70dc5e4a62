//! Append-only, timestamped history of responses, paths and image states.
//!
//! Nothing recorded here is ever overwritten. Every write appends a new
//! child carrying `LoginTime` (fixed for the login) and `ResponseTime`
//! (wall clock). The current value of a tag is the child with the latest
//! `ResponseTime`; when two timestamps are equal the later-appended one
//! wins.

use std::fmt;
use std::sync::Arc;

use quizzer_traits::SessionClock;
use quizzer_types::Timestamp;
use quizzer_xml::{Document, NodeId};

use crate::error::{QuizError, ValidationWarning};
use crate::tags::{self, attr};

/// Why a response was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEvent {
    NextButton,
    PreviousButton,
    FinishButton,
    /// The page failed validation and the user's answers were kept anyway.
    ValidationFailure,
    Other(String),
}

impl fmt::Display for ResponseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextButton => f.write_str("NextBtn"),
            Self::PreviousButton => f.write_str("PreviousBtn"),
            Self::FinishButton => f.write_str("FinishBtn"),
            Self::ValidationFailure => f.write_str("ValidationFailure"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// The three kinds of file references an image accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Image,
    LabelMap,
    MarkupLine,
}

impl PathKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Image => tags::PATH,
            Self::LabelMap => tags::LABEL_MAP_PATH,
            Self::MarkupLine => tags::MARKUP_LINE_PATH,
        }
    }
}

/// Writes journal entries for one login.
#[derive(Debug, Clone)]
pub struct Journal {
    clock: Arc<dyn SessionClock>,
    login_time: Timestamp,
    format: String,
}

impl Journal {
    /// Starts a journal whose login time is the clock's current time.
    pub fn new(clock: Arc<dyn SessionClock>, format: impl Into<String>) -> Self {
        let login_time = Timestamp::new(clock.now());
        Self {
            clock,
            login_time,
            format: format.into(),
        }
    }

    pub fn login_time(&self) -> Timestamp {
        self.login_time
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn clock(&self) -> &dyn SessionClock {
        self.clock.as_ref()
    }

    pub fn login_time_string(&self) -> String {
        self.login_time.format(&self.format)
    }

    /// Current wall-clock time in the journal's format.
    pub fn now_string(&self) -> String {
        Timestamp::new(self.clock.now()).format(&self.format)
    }

    fn stamped<'a>(
        &self,
        login: &'a str,
        now: &'a str,
        extra: &[(&'a str, &'a str)],
    ) -> Vec<(&'a str, &'a str)> {
        let mut attributes = vec![(attr::LOGIN_TIME, login), (attr::RESPONSE_TIME, now)];
        attributes.extend_from_slice(extra);
        attributes
    }

    /// Appends a `Response` to an option.
    pub fn add_response_element(
        &self,
        doc: &mut Document,
        option: NodeId,
        value: &str,
        event: &ResponseEvent,
    ) -> Result<NodeId, QuizError> {
        let login = self.login_time_string();
        let now = self.now_string();
        let event = event.to_string();
        let attributes = self.stamped(&login, &now, &[(attr::EVENT, event.as_str())]);
        Ok(doc.add_element(option, tags::RESPONSE, Some(value), &attributes)?)
    }

    /// Appends a `State` snapshot (window/level, slice, orientation, ...) to an image.
    pub fn add_image_state_element(
        &self,
        doc: &mut Document,
        image: NodeId,
        state: &[(&str, &str)],
    ) -> Result<NodeId, QuizError> {
        let login = self.login_time_string();
        let now = self.now_string();
        let attributes = self.stamped(&login, &now, state);
        Ok(doc.add_element(image, tags::STATE, None, &attributes)?)
    }

    /// Appends a `Path`, `LabelMapPath` or `MarkupLinePath` to an image.
    pub fn add_path_element(
        &self,
        doc: &mut Document,
        image: NodeId,
        kind: PathKind,
        path: &str,
    ) -> Result<NodeId, QuizError> {
        let login = self.login_time_string();
        let now = self.now_string();
        let attributes = self.stamped(&login, &now, &[]);
        Ok(doc.add_element(image, kind.tag(), Some(path), &attributes)?)
    }

    pub fn latest(&self, doc: &Document, parent: NodeId, tag: &str) -> Option<NodeId> {
        get_latest_child_element(doc, parent, tag, &self.format)
    }
}

/// The `tag` child of `parent` with the greatest `ResponseTime`, or
/// `LoginTime` for children that carry no `ResponseTime`.
///
/// Ties go to the later child in document order. Children whose timestamp
/// does not parse rank below every parsed one.
pub fn get_latest_child_element(
    doc: &Document,
    parent: NodeId,
    tag: &str,
    format: &str,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, Option<Timestamp>)> = None;
    for child in doc.children_iter(parent, tag) {
        let time = doc
            .attribute(child, attr::RESPONSE_TIME)
            .or_else(|| doc.attribute(child, attr::LOGIN_TIME))
            .and_then(|t| Timestamp::parse(t, format));
        match best {
            Some((_, best_time)) if time < best_time => {}
            _ => best = Some((child, time)),
        }
    }
    best.map(|(node, _)| node)
}

/// The first `tag` child of `parent`, warning when there is more than one.
pub fn single_child(
    doc: &Document,
    parent: NodeId,
    tag: &str,
) -> (Option<NodeId>, Option<ValidationWarning>) {
    let matches = doc.children(parent, tag);
    let warning = (matches.len() > 1).then(|| {
        let warning = ValidationWarning {
            parent,
            tag: tag.to_string(),
            count: matches.len(),
        };
        log::warn!("{}", warning);
        warning
    });
    (matches.first().copied(), warning)
}
