//! The arena tree and its accessors.
//!
//! Nodes live in an `indextree` arena and are never freed. Removing an
//! element only detaches it from its parent, so a `NodeId` handed out
//! earlier stays valid for the lifetime of the document even after the
//! element leaves the tree.

use indextree::Arena;

use crate::XmlError;

/// Handle to an element of a [`Document`].
pub use indextree::NodeId;

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: Option<String>,
}

impl NodeData {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
        }
    }
}

/// A mutable XML document: the whole quiz plus every response recorded so far.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) arena: Arena<NodeData>,
    pub(crate) root: NodeId,
}

impl Document {
    /// Creates a document holding only an empty root element.
    pub fn new(root_tag: &str) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::new(root_tag));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of elements in the arena, detached ones included.
    pub fn node_count(&self) -> usize {
        self.arena.count()
    }

    pub(crate) fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena.get(node).map(|n| n.get())
    }

    fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData, XmlError> {
        self.arena
            .get_mut(node)
            .map(|n| n.get_mut())
            .ok_or_else(|| XmlError::invalid(node, "not part of this document"))
    }

    fn contains(&self, node: NodeId) -> bool {
        self.arena.get(node).is_some()
    }

    // --- Read accessors ---

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.data(node).map(|d| d.tag.as_str())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.data(node).and_then(|d| d.text.as_deref())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.parent())
    }

    /// The value of `name`, or `None` when the attribute is absent.
    ///
    /// An attribute that is present but empty returns `Some("")`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.data(node).and_then(|d| {
            d.attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
    }

    /// The value of `name`, treating an absent attribute as empty.
    pub fn attribute_or_empty(&self, node: NodeId, name: &str) -> &str {
        self.attribute(node, name).unwrap_or("")
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        self.data(node).map(|d| d.attributes.as_slice()).unwrap_or(&[])
    }

    /// All child elements in document order, whatever their tag.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.child_iter(node).collect()
    }

    fn child_iter(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.contains(node)
            .then(|| node.children(&self.arena))
            .into_iter()
            .flatten()
    }

    /// Child elements with the given tag, in document order.
    pub fn children(&self, parent: NodeId, tag: &str) -> Vec<NodeId> {
        self.children_iter(parent, tag).collect()
    }

    pub fn children_iter<'a>(
        &'a self,
        parent: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.child_iter(parent)
            .filter(move |&c| self.tag(c) == Some(tag))
    }

    pub fn child_count(&self, parent: NodeId, tag: &str) -> usize {
        self.children_iter(parent, tag).count()
    }

    /// The `n`th child with the given tag (0-based).
    pub fn nth_child(&self, parent: NodeId, tag: &str, n: usize) -> Option<NodeId> {
        self.children_iter(parent, tag).nth(n)
    }

    /// The last child with the given tag; `None` when there is none.
    pub fn last_child(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children_iter(parent, tag).last()
    }

    /// Every element below `node` with the given tag, depth first.
    pub fn descendants(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        node.descendants(&self.arena)
            .skip(1)
            .filter(|&d| self.tag(d) == Some(tag))
            .collect()
    }

    /// Position of `child` among all of `parent`'s child elements.
    pub fn index_in_parent(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.child_iter(parent).position(|c| c == child)
    }

    // --- Mutation ---

    pub fn set_text(&mut self, node: NodeId, text: Option<&str>) -> Result<(), XmlError> {
        self.data_mut(node)?.text = text.map(str::to_string);
        Ok(())
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), XmlError> {
        let data = self.data_mut(node)?;
        match data.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Removes an attribute and returns its former value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<Option<String>, XmlError> {
        let data = self.data_mut(node)?;
        let removed = data
            .attributes
            .iter()
            .position(|(k, _)| k == name)
            .map(|pos| data.attributes.remove(pos).1);
        Ok(removed)
    }

    /// Appends a new child element to `parent`.
    pub fn add_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        text: Option<&str>,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, XmlError> {
        if !self.contains(parent) {
            return Err(XmlError::invalid(parent, "not part of this document"));
        }
        let mut data = NodeData::new(tag);
        data.text = text.map(str::to_string);
        data.attributes = attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let id = self.arena.new_node(data);
        parent
            .checked_append(id, &mut self.arena)
            .map_err(|e| XmlError::invalid(id, e.to_string()))?;
        Ok(id)
    }

    /// Attaches a detached element as the last child of `parent`.
    pub fn append_node(&mut self, parent: NodeId, node: NodeId) -> Result<(), XmlError> {
        self.insert_element_before_index(parent, usize::MAX, node)
    }

    /// Attaches a detached element before the child currently at `index`.
    ///
    /// An index past the end appends.
    pub fn insert_element_before_index(
        &mut self,
        parent: NodeId,
        index: usize,
        node: NodeId,
    ) -> Result<(), XmlError> {
        if !self.contains(parent) {
            return Err(XmlError::invalid(parent, "not part of this document"));
        }
        if !self.contains(node) {
            return Err(XmlError::invalid(node, "not part of this document"));
        }
        if self.parent(node).is_some() {
            return Err(XmlError::invalid(node, "element is already attached"));
        }
        if parent.ancestors(&self.arena).any(|a| a == node) {
            return Err(XmlError::invalid(node, "element cannot contain itself"));
        }
        let sibling = self.child_iter(parent).nth(index);
        let attached = match sibling {
            Some(sibling) => sibling.checked_insert_before(node, &mut self.arena),
            None => parent.checked_append(node, &mut self.arena),
        };
        attached.map_err(|e| XmlError::invalid(node, e.to_string()))
    }

    /// Detaches `node` from its parent.
    pub fn remove_element(&mut self, node: NodeId) -> Result<(), XmlError> {
        if self.parent(node).is_none() {
            return Err(XmlError::invalid(node, "element has no parent"));
        }
        node.detach(&mut self.arena);
        Ok(())
    }

    /// Detaches every child of `parent` with the given tag, returning how many.
    pub fn remove_children(&mut self, parent: NodeId, tag: &str) -> Result<usize, XmlError> {
        let doomed = self.children(parent, tag);
        for &child in &doomed {
            self.remove_element(child)?;
        }
        Ok(doomed.len())
    }
}
