//! Tab-indented serialization through `quick-xml`.

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::{Document, NodeId, XmlError};

const INDENT_CHAR: u8 = b'\t';

impl Document {
    /// The whole document, with XML declaration, UTF-8 and tab indentation.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, 1);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| XmlError::Write(e.to_string()))?;
        self.write_node(&mut writer, self.root)?;
        into_string(writer)
    }

    /// A single element and its subtree, without declaration.
    pub fn element_to_string(&self, node: NodeId) -> Result<String, XmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, 1);
        self.write_node(&mut writer, node)?;
        into_string(writer)
    }

    /// Deep copy of `node`, returned detached.
    ///
    /// The copy goes through text and back, so it shares nothing with the
    /// source subtree.
    pub fn copy_element(&mut self, node: NodeId) -> Result<NodeId, XmlError> {
        let text = self.element_to_string(node)?;
        self.import_fragment(&text)
    }

    /// Writes the document to `path`, replacing any existing file.
    pub fn save_xml(&self, path: impl AsRef<Path>) -> Result<(), XmlError> {
        let path = path.as_ref();
        let text = self.to_xml_string()?;
        fs::write(path, text)?;
        log::debug!("Saved document to '{}'", path.display());
        Ok(())
    }

    fn write_node<W: Write>(&self, writer: &mut Writer<W>, node: NodeId) -> Result<(), XmlError> {
        let data = self
            .data(node)
            .ok_or_else(|| XmlError::invalid(node, "not part of this document"))?;

        let mut start = BytesStart::new(data.tag.as_str());
        for (key, value) in &data.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let children = self.child_elements(node);
        if children.is_empty() && data.text.is_none() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| XmlError::Write(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| XmlError::Write(e.to_string()))?;
        if let Some(text) = &data.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| XmlError::Write(e.to_string()))?;
        }
        for child in children {
            self.write_node(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(data.tag.as_str())))
            .map_err(|e| XmlError::Write(e.to_string()))
    }
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, XmlError> {
    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Document {
        let mut doc = Document::new("Session");
        let root = doc.root();
        let page = doc
            .add_element(root, "Page", None, &[("ID", "P1"), ("Descriptor", "a < b")])
            .unwrap();
        let image = doc.add_element(page, "Image", None, &[("Type", "Volume")]).unwrap();
        doc.add_element(image, "Layer", Some("Background"), &[]).unwrap();
        doc.add_element(image, "Path", Some("/data/ct.nrrd"), &[("ResponseTime", "t1")])
            .unwrap();
        doc
    }

    #[test]
    fn test_output_is_tab_indented_with_declaration() {
        let text = sample().to_xml_string().unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.contains("\n\t<Page"));
        assert!(text.contains("\n\t\t<Image"));
        assert!(text.contains("<Layer>Background</Layer>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let text = sample().to_xml_string().unwrap();
        assert!(text.contains("Descriptor=\"a &lt; b\""));
    }

    #[test]
    fn test_save_then_open_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.xml");
        let original = sample();
        original.save_xml(&path).unwrap();

        let reopened = Document::open(&path, "Session").unwrap();
        assert_eq!(
            reopened.to_xml_string().unwrap(),
            original.to_xml_string().unwrap()
        );
        let page = reopened.nth_child(reopened.root(), "Page", 0).unwrap();
        assert_eq!(reopened.attribute(page, "Descriptor"), Some("a < b"));
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("results.xml");
        let err = sample().save_xml(&path).unwrap_err();
        assert!(matches!(err, XmlError::Io(_)));
    }

    #[test]
    fn test_copy_element_is_independent() {
        let mut doc = sample();
        let page = doc.nth_child(doc.root(), "Page", 0).unwrap();
        let copy = doc.copy_element(page).unwrap();

        assert_ne!(copy, page);
        assert!(doc.parent(copy).is_none());
        doc.set_attribute(copy, "ID", "P1-Rep1").unwrap();
        let copied_image = doc.nth_child(copy, "Image", 0).unwrap();
        doc.remove_children(copied_image, "Path").unwrap();

        assert_eq!(doc.attribute(page, "ID"), Some("P1"));
        let original_image = doc.nth_child(page, "Image", 0).unwrap();
        assert_eq!(doc.child_count(original_image, "Path"), 1);
        assert_eq!(doc.child_count(copied_image, "Layer"), 1);
    }
}
