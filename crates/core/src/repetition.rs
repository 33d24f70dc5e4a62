//! Page repetition.
//!
//! A page marked for looping is cloned so the user can go through it again.
//! The clone is placed at the end of the source page's repetition group
//! (just before the next page with `Rep="0"`) and stripped of everything the
//! user produced on the original.

use quizzer_types::PageId;
use quizzer_xml::{Document, NodeId};

use crate::error::QuizError;
use crate::navigation::{page_node, pages};
use crate::tags::{self, attr};

fn page_or_error(doc: &Document, page_index: usize) -> Result<NodeId, QuizError> {
    page_node(doc, page_index).ok_or_else(|| QuizError::Repetition {
        page_id: format!("#{}", page_index),
        message: "no page at this index".to_string(),
    })
}

/// The page's `Rep` as a number.
fn rep_of(doc: &Document, page: NodeId) -> Result<u32, QuizError> {
    let page_id = doc.attribute_or_empty(page, attr::ID);
    let rep = doc.attribute(page, attr::REP).ok_or_else(|| QuizError::Repetition {
        page_id: page_id.to_string(),
        message: "page has no Rep attribute".to_string(),
    })?;
    rep.trim().parse::<u32>().map_err(|_| QuizError::Repetition {
        page_id: page_id.to_string(),
        message: format!("Rep '{}' is not a number", rep),
    })
}

/// Inserts a deep copy of the page at `page_index` and returns the copy's
/// page index.
pub fn repeat_page(doc: &mut Document, page_index: usize) -> Result<usize, QuizError> {
    let source = page_or_error(doc, page_index)?;
    rep_of(doc, source)?;

    let all_pages = pages(doc);
    let next_group = all_pages
        .iter()
        .skip(page_index + 1)
        .copied()
        .find(|&p| doc.attribute(p, attr::REP).map(str::trim) == Some("0"));

    let position = next_group.and_then(|p| doc.index_in_parent(p));

    let clone = doc.copy_element(source)?;
    let root = doc.root();
    match position {
        Some(position) => doc.insert_element_before_index(root, position, clone)?,
        None => doc.append_node(root, clone)?,
    }

    let new_index = pages(doc)
        .iter()
        .position(|&p| p == clone)
        .ok_or_else(|| QuizError::Repetition {
            page_id: doc.attribute_or_empty(source, attr::ID).to_string(),
            message: "inserted copy is not a page of the document".to_string(),
        })?;
    log::info!(
        "Repeated page '{}' (index {}) as index {}",
        doc.attribute_or_empty(source, attr::ID),
        page_index,
        new_index
    );
    Ok(new_index)
}

/// Turns the copy at `new_index` into the next repetition of the page at
/// `prev_index`.
pub fn adjust_repeated_page(
    doc: &mut Document,
    new_index: usize,
    prev_index: usize,
) -> Result<(), QuizError> {
    let previous = page_or_error(doc, prev_index)?;
    let page = page_or_error(doc, new_index)?;

    let rep = rep_of(doc, previous)? + 1;
    let id = PageId::new(doc.attribute_or_empty(previous, attr::ID)).with_rep(rep);

    doc.set_attribute(page, attr::PAGE_COMPLETE, "N")?;
    doc.set_attribute(page, attr::REP, &rep.to_string())?;
    doc.set_attribute(page, attr::ID, id.as_str())?;
    doc.remove_attribute(page, attr::BOOKMARK_ID)?;

    for image in doc.children(page, tags::IMAGE) {
        doc.remove_children(image, tags::LABEL_MAP_PATH)?;
        doc.remove_children(image, tags::MARKUP_LINE_PATH)?;
    }
    for option in doc.descendants(page, tags::OPTION) {
        doc.remove_children(option, tags::RESPONSE)?;
    }

    log::debug!("Adjusted repeated page to ID '{}', Rep {}", id, rep);
    Ok(())
}

/// [`repeat_page`] followed by [`adjust_repeated_page`].
pub fn repeat_and_adjust(doc: &mut Document, page_index: usize) -> Result<usize, QuizError> {
    let new_index = repeat_page(doc, page_index)?;
    adjust_repeated_page(doc, new_index, page_index)?;
    Ok(new_index)
}
