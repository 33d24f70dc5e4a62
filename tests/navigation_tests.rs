mod common;

use common::fixtures::{grouped_quiz, looping_quiz};
use common::{TestResult, page_ids, session_from, test_clock};
use quizzer::history::{find_bookmark, find_element_by_attribute_history};
use quizzer::navigation::{apply_randomization, build_navigation_list};
use quizzer::{Document, SessionBuilder};

#[test]
fn test_navigation_build_is_idempotent() -> TestResult {
    let mut doc = Document::parse_str(looping_quiz(), "Session")?;
    let first = build_navigation_list(&mut doc)?;
    let second = build_navigation_list(&mut doc)?;
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    Ok(())
}

#[test]
fn test_repeat_current_page_renumbers_the_copy() -> TestResult {
    let mut session = session_from(looping_quiz())?;
    assert_eq!(session.start()?, 1);
    assert!(session.is_looping_page());

    let index = session.repeat_current_page()?;
    let doc = session.document();
    assert_eq!(
        page_ids(doc, session.navigation()),
        vec!["Welcome", "Case", "Case-Rep1", "Summary", "Goodbye"]
    );
    assert_eq!(index, 2);

    let copy = session.current_page().ok_or("no page")?;
    assert_eq!(doc.attribute(copy, "Rep"), Some("1"));
    assert_eq!(doc.attribute(copy, "PageComplete"), Some("N"));
    assert_eq!(doc.attribute(copy, "BookmarkID"), None);
    assert!(doc.descendants(copy, "LabelMapPath").is_empty());
    assert!(doc.descendants(copy, "MarkupLinePath").is_empty());
    assert!(doc.descendants(copy, "Response").is_empty());

    // Repeating the copy chains the numbering.
    session.repeat_current_page()?;
    let doc = session.document();
    assert_eq!(
        page_ids(doc, session.navigation()),
        vec!["Welcome", "Case", "Case-Rep1", "Case-Rep2", "Summary", "Goodbye"]
    );
    assert_eq!(session.previous_instances()?.len(), 2);
    Ok(())
}

#[test]
fn test_history_only_looks_backwards() -> TestResult {
    let mut doc = Document::parse_str(looping_quiz(), "Session")?;
    let nav = build_navigation_list(&mut doc)?;

    assert!(find_element_by_attribute_history(&doc, &nav, 1, "Image", "ID", "CT").is_none());
    assert!(find_element_by_attribute_history(&doc, &nav, 2, "Image", "ID", "CT").is_some());
    assert_eq!(find_bookmark(&doc, &nav, 1, "CaseStart"), None);
    assert_eq!(find_bookmark(&doc, &nav, 3, "CaseStart"), Some(1));
    Ok(())
}

#[test]
fn test_randomized_groups_keep_fixed_pages() -> TestResult {
    let session = SessionBuilder::new()
        .with_document_source(grouped_quiz())
        .with_clock(test_clock())
        .with_seed(11)
        .build()?;
    let ids = page_ids(session.document(), session.navigation());

    assert_eq!(ids.len(), 7);
    assert_eq!(ids.first().map(String::as_str), Some("Intro"));
    assert_eq!(ids.last().map(String::as_str), Some("Outro"));
    // Groups move as blocks.
    let a1 = ids.iter().position(|id| id == "A1").ok_or("A1 missing")?;
    assert_eq!(ids[a1 + 1], "A2");
    let c1 = ids.iter().position(|id| id == "C1").ok_or("C1 missing")?;
    assert_eq!(ids[c1 + 1], "C2");
    Ok(())
}

#[test]
fn test_stored_permutation_survives_reopening() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("grouped.xml");
    std::fs::write(&path, grouped_quiz())?;

    let mut first = SessionBuilder::new()
        .with_document_file(&path)
        .with_clock(test_clock())
        .build()?;
    first.start()?;
    let order = page_ids(first.document(), first.navigation());

    let second = SessionBuilder::new()
        .with_document_file(&path)
        .with_clock(test_clock())
        .build()?;
    assert_eq!(page_ids(second.document(), second.navigation()), order);
    Ok(())
}

#[test]
fn test_disabled_randomization_keeps_document_order() -> TestResult {
    let session = SessionBuilder::new()
        .with_document_source(grouped_quiz())
        .with_clock(test_clock())
        .with_randomization(false)
        .build()?;
    assert_eq!(
        page_ids(session.document(), session.navigation()),
        vec!["Intro", "A1", "A2", "B1", "C1", "C2", "Outro"]
    );

    let reversed = apply_randomization(session.navigation(), &[3, 2, 1]);
    assert_eq!(
        page_ids(session.document(), &reversed),
        vec!["Intro", "C1", "C2", "B1", "A1", "A2", "Outro"]
    );
    Ok(())
}
