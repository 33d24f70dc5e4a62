//! Loading documents through `roxmltree`.
//!
//! Only elements, attributes and text survive the import. Whitespace-only
//! text (the indentation written by [`Document::save_xml`]) is dropped, as
//! are comments and processing instructions.

use std::fs;
use std::path::Path;

use indextree::Arena;

use crate::document::NodeData;
use crate::{Document, NodeId, XmlError};

impl Document {
    /// Opens `path` and checks that its root element is `expected_root_tag`.
    pub fn open(path: impl AsRef<Path>, expected_root_tag: &str) -> Result<Self, XmlError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(XmlError::NotFound(path.to_path_buf()));
        }
        let source_name = path.display().to_string();
        let text = String::from_utf8(fs::read(path)?).map_err(|e| XmlError::Parse {
            source_name: source_name.clone(),
            message: format!("document is not valid UTF-8: {e}"),
        })?;
        let doc = Self::parse_named(&text, &source_name)?;
        doc.check_root(expected_root_tag)?;
        log::debug!("Opened '{}' with {} elements", path.display(), doc.node_count());
        Ok(doc)
    }

    /// Parses an in-memory document and checks its root element.
    pub fn parse_str(text: &str, expected_root_tag: &str) -> Result<Self, XmlError> {
        let doc = Self::parse_named(text, "<memory>")?;
        doc.check_root(expected_root_tag)?;
        Ok(doc)
    }

    fn check_root(&self, expected: &str) -> Result<(), XmlError> {
        let found = self.tag(self.root).unwrap_or_default();
        if found != expected {
            return Err(XmlError::RootMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn parse_named(text: &str, source_name: &str) -> Result<Self, XmlError> {
        let parsed = roxmltree::Document::parse(text).map_err(|e| XmlError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        let mut arena = Arena::new();
        let root = import(&mut arena, parsed.root_element());
        Ok(Document { arena, root })
    }

    /// Parses `text` as a single element and adds it to this document's
    /// arena, detached from the tree.
    pub(crate) fn import_fragment(&mut self, text: &str) -> Result<NodeId, XmlError> {
        let parsed = roxmltree::Document::parse(text).map_err(|e| XmlError::Parse {
            source_name: "<fragment>".to_string(),
            message: e.to_string(),
        })?;
        Ok(import(&mut self.arena, parsed.root_element()))
    }
}

fn import(arena: &mut Arena<NodeData>, node: roxmltree::Node<'_, '_>) -> NodeId {
    let mut data = NodeData::new(node.tag_name().name());
    data.attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    let id = arena.new_node(data);

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let child_id = import(arena, child);
            id.append(child_id, arena);
        } else if child.is_text()
            && let Some(t) = child.text()
        {
            text.push_str(t);
        }
    }

    if !text.trim().is_empty()
        && let Some(entry) = arena.get_mut(id)
    {
        entry.get_mut().text = Some(text);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Session>
    <!-- authoring note -->
    <Page ID="P1" Descriptor="Chest &amp; Abdomen">
        <Image Type="Volume">
            <Layer>Background</Layer>
        </Image>
    </Page>
</Session>"#;

    #[test]
    fn test_parse_keeps_elements_and_attributes() {
        let doc = Document::parse_str(QUIZ, "Session").unwrap();
        let page = doc.nth_child(doc.root(), "Page", 0).unwrap();
        assert_eq!(doc.attribute(page, "Descriptor"), Some("Chest & Abdomen"));
        let image = doc.nth_child(page, "Image", 0).unwrap();
        let layer = doc.nth_child(image, "Layer", 0).unwrap();
        assert_eq!(doc.text(layer), Some("Background"));
    }

    #[test]
    fn test_parse_drops_indentation_text() {
        let doc = Document::parse_str(QUIZ, "Session").unwrap();
        let page = doc.nth_child(doc.root(), "Page", 0).unwrap();
        assert_eq!(doc.text(page), None);
        assert_eq!(doc.child_elements(doc.root()).len(), 1);
    }

    #[test]
    fn test_root_mismatch() {
        let err = Document::parse_str(QUIZ, "Quiz").unwrap_err();
        match err {
            XmlError::RootMismatch { expected, found } => {
                assert_eq!(expected, "Quiz");
                assert_eq!(found, "Session");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = Document::parse_str("<Session><Page></Session>", "Session").unwrap_err();
        assert!(matches!(err, XmlError::Parse { .. }));
    }

    #[test]
    fn test_non_utf8_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.xml");
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><Session><Page Descriptor=\"".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"\"/></Session>");
        std::fs::write(&path, bytes).unwrap();

        let err = Document::open(&path, "Session").unwrap_err();
        match err {
            XmlError::Parse { source_name, message } => {
                assert!(source_name.ends_with("latin1.xml"));
                assert!(message.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Document::open("/definitely/not/here.xml", "Session").unwrap_err();
        assert!(matches!(err, XmlError::NotFound(_)));
    }
}
