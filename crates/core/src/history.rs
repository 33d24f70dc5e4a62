//! Searches over pages the user has already visited.
//!
//! "Already visited" means earlier in the navigation list, not earlier in
//! the document: with randomized page groups the two differ. Every search
//! walks the list backwards from `current_index - 1` to 0 and never looks
//! at `current_index` or beyond.
//!
//! All functions are pure over `(&Document, &[NavigationEntry])`.

use std::collections::HashSet;

use regex::Regex;

use quizzer_types::{NavigationEntry, PageId};
use quizzer_xml::{Document, NodeId};

use crate::error::QuizError;
use crate::journal::get_latest_child_element;
use crate::navigation::page_node;
use crate::tags::{self, attr};

/// Pattern of the suffix repeated pages carry on their `ID`.
pub const REP_SUFFIX_PATTERN: &str = r"-Rep\d+$";

/// An element found on a previously visited page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryMatch {
    pub page: NodeId,
    pub page_index: usize,
    pub navigation_index: usize,
    pub element: NodeId,
}

/// A previously visited page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPage {
    pub page: NodeId,
    pub page_index: usize,
    pub navigation_index: usize,
}

/// `(navigation_index, page)` pairs before `current_index`, most recent first.
fn visited_pages<'a>(
    doc: &'a Document,
    navigation: &'a [NavigationEntry],
    current_index: usize,
) -> impl Iterator<Item = (usize, usize, NodeId)> + 'a {
    let upper = current_index.min(navigation.len());
    (0..upper).rev().filter_map(move |nav_index| {
        let page_index = navigation[nav_index].page_index;
        page_node(doc, page_index).map(|page| (nav_index, page_index, page))
    })
}

/// The first `child_tag` child (in document order) whose `attribute` equals
/// `value`, on the most recently visited page that has one.
///
/// The search stops at the first page producing a hit; earlier pages are
/// not consulted even if that hit later proves unsuitable.
pub fn find_element_by_attribute_history(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    child_tag: &str,
    attribute: &str,
    value: &str,
) -> Option<NodeId> {
    find_element_and_page_by_attribute_history(
        doc,
        navigation,
        current_index,
        child_tag,
        attribute,
        value,
    )
    .map(|m| m.element)
}

/// Same as [`find_element_by_attribute_history`], also reporting the page.
pub fn find_element_and_page_by_attribute_history(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    child_tag: &str,
    attribute: &str,
    value: &str,
) -> Option<HistoryMatch> {
    let mut scanned = HashSet::new();
    for (navigation_index, page_index, page) in visited_pages(doc, navigation, current_index) {
        if !scanned.insert(page_index) {
            continue;
        }
        let hit = doc
            .children_iter(page, child_tag)
            .find(|&child| doc.attribute(child, attribute) == Some(value));
        if let Some(element) = hit {
            log::debug!(
                "History hit for {}[{}='{}'] on page {} (navigation index {})",
                child_tag,
                attribute,
                value,
                page_index,
                navigation_index
            );
            return Some(HistoryMatch {
                page,
                page_index,
                navigation_index,
                element,
            });
        }
    }
    None
}

/// Every visited page whose attributes match all of `attributes`, most
/// recent first, one result per page.
///
/// When `ignore` is given, its matches are removed from the stored values
/// before comparing.
pub fn find_matching_pages_by_attribute_history(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    attributes: &[(&str, &str)],
    ignore: Option<&Regex>,
) -> Vec<HistoryPage> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (navigation_index, page_index, page) in visited_pages(doc, navigation, current_index) {
        if !seen.insert(page_index) {
            continue;
        }
        let matches = attributes.iter().all(|(name, expected)| {
            doc.attribute(page, name).is_some_and(|stored| match ignore {
                Some(pattern) => pattern.replace_all(stored, "") == *expected,
                None => stored == *expected,
            })
        });
        if matches {
            found.push(HistoryPage {
                page,
                page_index,
                navigation_index,
            });
        }
    }
    found
}

/// Earlier repetitions of the page at `current_index`: same `PageGroup`
/// and same `ID` once the `-Rep<n>` suffix is ignored.
pub fn find_previous_instances_of_page(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
) -> Result<Vec<HistoryPage>, QuizError> {
    let entry = navigation.get(current_index).ok_or_else(|| {
        QuizError::Navigation(format!("navigation index {} out of range", current_index))
    })?;
    let page = page_node(doc, entry.page_index)
        .ok_or_else(|| QuizError::Navigation(format!("page {} not found", entry.page_index)))?;

    let id = PageId::new(doc.attribute_or_empty(page, attr::ID));
    let group = entry.page_group.to_string();
    let rep_suffix = Regex::new(REP_SUFFIX_PATTERN)?;
    Ok(find_matching_pages_by_attribute_history(
        doc,
        navigation,
        current_index,
        &[(attr::ID, id.base()), (attr::PAGE_GROUP, group.as_str())],
        Some(&rep_suffix),
    )
    .into_iter()
    .filter(|p| p.page_index != entry.page_index)
    .collect())
}

/// The image a `DisplayLabelMapID` link points at: the most recent visited
/// image whose `LabelMapID` equals `labelmap_id`.
pub fn find_labelmap_source(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    labelmap_id: &str,
) -> Option<HistoryMatch> {
    find_element_and_page_by_attribute_history(
        doc,
        navigation,
        current_index,
        tags::IMAGE,
        attr::LABEL_MAP_ID,
        labelmap_id,
    )
}

/// Navigation index of the most recent visited page carrying
/// `BookmarkID == bookmark_id`, entered at its first question set.
pub fn find_bookmark(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    bookmark_id: &str,
) -> Option<usize> {
    visited_pages(doc, navigation, current_index)
        .find(|(_, _, page)| doc.attribute(*page, attr::BOOKMARK_ID) == Some(bookmark_id))
        .and_then(|(_, page_index, _)| {
            navigation.iter().position(|e| e.page_index == page_index)
        })
}

/// The latest `State` recorded for the image with this `ID` on the most
/// recent visited page that shows it, so its display settings can be
/// re-applied.
pub fn find_previous_image_state(
    doc: &Document,
    navigation: &[NavigationEntry],
    current_index: usize,
    image_id: &str,
    timestamp_format: &str,
) -> Option<NodeId> {
    let mut scanned = HashSet::new();
    for (_, page_index, page) in visited_pages(doc, navigation, current_index) {
        if !scanned.insert(page_index) {
            continue;
        }
        let state = doc
            .children_iter(page, tags::IMAGE)
            .filter(|&image| doc.attribute(image, attr::ID) == Some(image_id))
            .find_map(|image| get_latest_child_element(doc, image, tags::STATE, timestamp_format));
        if state.is_some() {
            return state;
        }
    }
    None
}
