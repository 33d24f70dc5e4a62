//! Builds the flat navigation list from the page tree.
//!
//! The list has one [`NavigationEntry`] per question set of every page, in
//! page document order. Building it also normalizes the document: pages
//! without a `PageGroup` get their 1-based position, pages without a `Rep`
//! get `"0"`, and a page without question sets gets a blank placeholder so
//! its images can still be shown. Because those fixes are written back,
//! building twice yields the same list.

mod randomize;

pub use randomize::{apply_randomization, page_group_permutation};

use quizzer_types::{NavigationEntry, PageLayout};
use quizzer_xml::{Document, NodeId};

use crate::error::QuizError;
use crate::tags::{self, attr};

pub const BLANK_QUESTION_SET_ID: &str = "QS-Blank";
pub const BLANK_QUESTION_SET_DESCRIPTOR: &str = "Blank Quiz";

/// All `Page` elements under the root, in document order.
pub fn pages(doc: &Document) -> Vec<NodeId> {
    doc.children(doc.root(), tags::PAGE)
}

pub fn page_node(doc: &Document, page_index: usize) -> Option<NodeId> {
    doc.nth_child(doc.root(), tags::PAGE, page_index)
}

/// Derives the navigation list in document order, normalizing the
/// document as it goes.
pub fn build_navigation_list(doc: &mut Document) -> Result<Vec<NavigationEntry>, QuizError> {
    let mut navigation = Vec::new();

    for (page_index, page) in pages(doc).into_iter().enumerate() {
        let page_group = ensure_page_group(doc, page, page_index)?;
        let rep = ensure_rep(doc, page)?;

        if doc.child_count(page, tags::QUESTION_SET) == 0 {
            log::debug!("Page {} has no question sets; adding a blank one", page_index);
            doc.add_element(
                page,
                tags::QUESTION_SET,
                None,
                &[
                    (attr::ID, BLANK_QUESTION_SET_ID),
                    (attr::DESCRIPTOR, BLANK_QUESTION_SET_DESCRIPTOR),
                ],
            )?;
        }

        for question_set_index in 0..doc.child_count(page, tags::QUESTION_SET) {
            navigation.push(NavigationEntry::new(
                page_index,
                question_set_index,
                page_group,
                rep,
            ));
        }
    }

    log::debug!("Built navigation list with {} entries", navigation.len());
    Ok(navigation)
}

fn ensure_page_group(doc: &mut Document, page: NodeId, page_index: usize) -> Result<u32, QuizError> {
    if let Some(group) = doc.attribute(page, attr::PAGE_GROUP) {
        match group.trim().parse::<u32>() {
            Ok(group) => return Ok(group),
            Err(_) => log::warn!(
                "Page {} has non-numeric PageGroup '{}'; replacing it with {}",
                page_index,
                group,
                page_index + 1
            ),
        }
    }
    let group = (page_index + 1) as u32;
    doc.set_attribute(page, attr::PAGE_GROUP, &group.to_string())?;
    Ok(group)
}

fn ensure_rep(doc: &mut Document, page: NodeId) -> Result<u32, QuizError> {
    match doc.attribute(page, attr::REP) {
        Some(rep) => Ok(rep.trim().parse::<u32>().unwrap_or_else(|_| {
            log::warn!(
                "Page '{}' has non-numeric Rep '{}'; treating it as 0",
                doc.attribute_or_empty(page, attr::ID),
                rep
            );
            0
        })),
        None => {
            doc.set_attribute(page, attr::REP, "0")?;
            Ok(0)
        }
    }
}

/// Position of the first entry for `page_index`, used to enter a page at
/// its first question set.
pub fn navigation_index_for_page(navigation: &[NavigationEntry], page_index: usize) -> Option<usize> {
    navigation.iter().position(|e| e.page_index == page_index)
}

pub fn page_for_entry(doc: &Document, entry: &NavigationEntry) -> Option<NodeId> {
    page_node(doc, entry.page_index)
}

pub fn question_set_for_entry(doc: &Document, entry: &NavigationEntry) -> Option<NodeId> {
    let page = page_for_entry(doc, entry)?;
    doc.nth_child(page, tags::QUESTION_SET, entry.question_set_index)
}

/// The viewer layout each navigation entry asks for.
///
/// Pages without a recognizable `Layout` get the default arrangement.
pub fn layout_for_navigation_list(doc: &Document, navigation: &[NavigationEntry]) -> Vec<PageLayout> {
    navigation
        .iter()
        .map(|entry| {
            page_for_entry(doc, entry)
                .and_then(|page| doc.attribute(page, attr::LAYOUT))
                .and_then(|layout| match layout.parse::<PageLayout>() {
                    Ok(layout) => Some(layout),
                    Err(e) => {
                        log::warn!("{}; using the default layout", e);
                        None
                    }
                })
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = r#"<Session>
        <Page ID="P1" Layout="OneByTwo">
            <QuestionSet ID="QS1"/>
            <QuestionSet ID="QS2"/>
        </Page>
        <Page ID="P2" PageGroup="7" Rep="2">
            <Image Type="Volume"/>
        </Page>
        <Login LoginTime="x"/>
        <Page ID="P3" Layout="Bogus">
            <QuestionSet ID="QS3"/>
        </Page>
    </Session>"#;

    fn quiz() -> Document {
        Document::parse_str(QUIZ, "Session").unwrap()
    }

    #[test]
    fn test_one_entry_per_question_set() {
        let mut doc = quiz();
        let nav = build_navigation_list(&mut doc).unwrap();
        assert_eq!(
            nav,
            vec![
                NavigationEntry::new(0, 0, 1, 0),
                NavigationEntry::new(0, 1, 1, 0),
                NavigationEntry::new(1, 0, 7, 2),
                NavigationEntry::new(2, 0, 3, 0),
            ]
        );
    }

    #[test]
    fn test_defaults_written_back() {
        let mut doc = quiz();
        build_navigation_list(&mut doc).unwrap();
        let p1 = page_node(&doc, 0).unwrap();
        assert_eq!(doc.attribute(p1, "PageGroup"), Some("1"));
        assert_eq!(doc.attribute(p1, "Rep"), Some("0"));
        let p2 = page_node(&doc, 1).unwrap();
        let blank = doc.nth_child(p2, "QuestionSet", 0).unwrap();
        assert_eq!(doc.attribute(blank, "Descriptor"), Some("Blank Quiz"));
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut doc = quiz();
        let first = build_navigation_list(&mut doc).unwrap();
        let snapshot = doc.to_xml_string().unwrap();
        let second = build_navigation_list(&mut doc).unwrap();

        assert_eq!(first, second);
        assert_eq!(doc.to_xml_string().unwrap(), snapshot);
    }

    #[test]
    fn test_navigation_index_for_page() {
        let mut doc = quiz();
        let nav = build_navigation_list(&mut doc).unwrap();
        assert_eq!(navigation_index_for_page(&nav, 0), Some(0));
        assert_eq!(navigation_index_for_page(&nav, 2), Some(3));
        assert_eq!(navigation_index_for_page(&nav, 9), None);
    }

    #[test]
    fn test_question_set_for_entry() {
        let mut doc = quiz();
        let nav = build_navigation_list(&mut doc).unwrap();
        let qs = question_set_for_entry(&doc, &nav[1]).unwrap();
        assert_eq!(doc.attribute(qs, "ID"), Some("QS2"));
    }

    #[test]
    fn test_layouts_fall_back_to_default() {
        let mut doc = quiz();
        let nav = build_navigation_list(&mut doc).unwrap();
        let layouts = layout_for_navigation_list(&doc, &nav);
        assert_eq!(layouts[0], PageLayout::OneByTwo);
        assert_eq!(layouts[2], PageLayout::TwoOverTwo);
        assert_eq!(layouts[3], PageLayout::TwoOverTwo);
    }
}
