//! Headless DOM tree for the trellis widget toolkit.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), together with the
//! [`DomFacade`] trait: the narrow set of document operations the widget
//! layer is allowed to use.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//! [`DomTree`] is a complete, headless implementation of the facade: it keeps
//! attributes and inline styles, and derives offset geometry from inline
//! lengths (see [`geometry`]) instead of running a full CSS layout.

pub mod error;
pub mod facade;
pub mod geometry;
pub mod style;
pub mod template;

pub use error::DomError;
pub use facade::DomFacade;
pub use style::{StyleMap, parse_px, px};
pub use template::{TemplateNode, parse_template};

use std::collections::{HashMap, HashSet};

use trellis_common::IdSequence;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: We only store the local name, the attribute list and the inline
/// declaration block. The `style` attribute is not kept in `attrs`; it is
/// always serialized from `style` on demand.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// [CSSOM § 6.7.1](https://www.w3.org/TR/cssom-1/#dom-elementcssinlinestyle-style)
    /// The element's inline declaration block.
    pub style: StyleMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&String> {
        self.attrs.get("id")
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// [§ 4.9 DOMTokenList add()](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    ///
    /// Appends `class` to the class attribute unless already present.
    /// Returns `true` if the list changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.classes().contains(class) {
            return false;
        }
        let list = self.attrs.entry("class".to_string()).or_default();
        if !list.trim().is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        true
    }

    /// [§ 4.9 DOMTokenList remove()](https://dom.spec.whatwg.org/#dom-domtokenlist-remove)
    ///
    /// Returns `true` if the list changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let Some(list) = self.attrs.get("class") else {
            return false;
        };
        let kept: Vec<&str> = list
            .split_ascii_whitespace()
            .filter(|token| *token != class)
            .collect();
        if kept.len() == list.split_ascii_whitespace().count() {
            return false;
        }
        let joined = kept.join(" ");
        let _ = self.attrs.insert("class".to_string(), joined);
        true
    }
}

/// [§ 4.9](https://dom.spec.whatwg.org/#dom-element-setattribute)
///
/// Attribute names may not be empty and may not contain whitespace, quotes,
/// `<`, `>`, `/` or `=`.
///
/// # Errors
///
/// Returns [`DomError::InvalidAttributeName`] for names that could not be
/// serialized back into markup.
pub fn validate_attribute_name(name: &str) -> Result<(), DomError> {
    let invalid = name.is_empty()
        || name.chars().any(|c| {
            c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=') || c.is_control()
        });
    if invalid {
        Err(DomError::InvalidAttributeName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. Nodes are never freed; removing a node only
/// unlinks it, so a removed element keeps its attributes and inline style
/// and can be inserted again.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
    /// Source of generated element ids.
    ids: IdSequence,
    /// Size of the initial containing block, if any.
    viewport: Option<(f32, f32)>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self {
            nodes: vec![document],
            ids: IdSequence::default(),
            viewport: None,
        }
    }

    /// Create a document with `<html><body></body></html>` whose body fills
    /// a `width` x `height` viewport.
    #[must_use]
    pub fn with_viewport(width: f32, height: f32) -> Self {
        let mut tree = Self::new();
        tree.viewport = Some((width, height));
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        tree.link_last(NodeId::ROOT, html);
        tree.link_last(html, body);
        if let Some(data) = tree.as_element_mut(body) {
            data.style.set("width", px(width));
            data.style.set("height", px(height));
        }
        tree
    }

    /// The viewport size, if the document was created with one.
    #[must_use]
    pub const fn viewport(&self) -> Option<(f32, f32)> {
        self.viewport
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 createElement()](https://dom.spec.whatwg.org/#dom-document-createelement)
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// [§ 4.5 createTextNode()](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// Build a detached element tree from an HTML template and return its
    /// root element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MalformedTemplate`] if the template is not a single
    /// well-formed element, or [`DomError::InvalidAttributeName`].
    pub fn create_from_html(&mut self, template: &str) -> Result<NodeId, DomError> {
        let root = parse_template(template)?;
        self.instantiate(&root)
    }

    fn instantiate(&mut self, node: &TemplateNode) -> Result<NodeId, DomError> {
        match node {
            TemplateNode::Text(text) => Ok(self.create_text(text)),
            TemplateNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.create_element(tag);
                for (name, value) in attrs {
                    self.set_attribute(id, name, value)?;
                }
                for child in children {
                    let child_id = self.instantiate(child)?;
                    self.link_last(id, child_id);
                }
                Ok(id)
            }
        }
    }

    fn check(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::UnknownNode(id))
    }

    /// [§ 4.2.3 Ensure pre-insertion validity](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    fn ensure_pre_insertion_validity(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        let parent_node = self.check(parent)?;
        let _ = self.check(node)?;
        // "If parent is not a Document, DocumentFragment, or Element node,
        // then throw a HierarchyRequestError."
        let parent_ok = matches!(
            parent_node.node_type,
            NodeType::Document | NodeType::Element(_)
        );
        // "If node is a host-including inclusive ancestor of parent, then
        // throw a HierarchyRequestError."
        if !parent_ok || node == NodeId::ROOT || node == parent || self.is_descendant_of(parent, node)
        {
            return Err(DomError::HierarchyRequest { parent, node });
        }
        Ok(())
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, moving it out of its
    /// current parent first.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownNode`] or [`DomError::HierarchyRequest`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(parent, child)?;
        self.unlink(child);
        self.link_last(parent, child);
        Ok(())
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] if `reference` is not a child of
    /// `parent`, plus the errors of [`append_child`](Self::append_child).
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(parent, child)?;
        if child == reference {
            return Ok(());
        }
        if self.parent(reference) != Some(parent) {
            return Err(DomError::NotAChild {
                parent,
                child: reference,
            });
        }
        self.unlink(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
            .ok_or(DomError::NotAChild {
                parent,
                child: reference,
            })?;
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.relink_siblings(parent);
        Ok(())
    }

    /// [§ 4.2.3 Pre-remove](https://dom.spec.whatwg.org/#concept-node-pre-remove)
    ///
    /// "If child's parent is not parent, then throw a NotFoundError."
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let _ = self.check(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(child);
        Ok(())
    }

    /// [§ 4.2.4 ChildNode remove()](https://dom.spec.whatwg.org/#dom-childnode-remove)
    ///
    /// "If this's parent is null, then return."
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownNode`] if `node` does not exist.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        let _ = self.check(node)?;
        self.unlink(node);
        Ok(())
    }

    /// Append without validation; `child` must be detached.
    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].next_sibling = None;
        self.nodes[child.0].prev_sibling = prev_last_child;

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// Detach `child` from its parent, repairing the sibling chain.
    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        self.nodes[parent.0].children.retain(|&id| id != child);
        if let Some(prev) = prev {
            self.nodes[prev.0].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.0].prev_sibling = prev;
        }
    }

    fn relink_siblings(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        for (index, &child) in children.iter().enumerate() {
            let prev = index.checked_sub(1).map(|i| children[i]);
            let next = children.get(index + 1).copied();
            let node = &mut self.nodes[child.0];
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// [§ 4.4 isConnected](https://dom.spec.whatwg.org/#dom-node-isconnected)
    ///
    /// "The isConnected getter steps are to return true, if this is
    /// connected; otherwise false."
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.is_descendant_of(id, NodeId::ROOT)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    fn element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        let _ = self.check(id)?;
        self.as_element(id).ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        let _ = self.check(id)?;
        self.as_element_mut(id).ok_or(DomError::NotAnElement(id))
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| e.tag_name == "body" || e.tag_name == "frameset")
            })
            .copied()
    }

    /// [§ 4.9 getAttribute()](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// The `style` attribute is serialized from the inline declaration block.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        let data = self.element(id)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            return Ok((!data.style.is_empty()).then(|| data.style.to_string()));
        }
        Ok(data.attrs.get(&name).cloned())
    }

    /// [§ 4.9 setAttribute()](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Setting `style` replaces the inline declaration block.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidAttributeName`] for names that are not valid
    /// attribute names, plus the errors of [`get_attribute`](Self::get_attribute).
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        validate_attribute_name(name)?;
        let data = self.element_mut(id)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            data.style = StyleMap::parse(value);
        } else {
            let _ = data.attrs.insert(name, value.to_string());
        }
        Ok(())
    }

    /// [§ 4.9 removeAttribute()](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let data = self.element_mut(id)?;
        let name = name.to_ascii_lowercase();
        if name == "style" {
            data.style = StyleMap::new();
        } else {
            let _ = data.attrs.remove(&name);
        }
        Ok(())
    }

    /// A copy of the element's inline declaration block.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn inline_style(&self, id: NodeId) -> Result<StyleMap, DomError> {
        Ok(self.element(id)?.style.clone())
    }

    /// Merge `styles` into the element's inline declaration block.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn apply_style(&mut self, id: NodeId, styles: &StyleMap) -> Result<(), DomError> {
        self.element_mut(id)?.style.merge(styles);
        Ok(())
    }

    /// [CSSOM § 9 getComputedStyle()](https://www.w3.org/TR/cssom-1/#dom-window-getcomputedstyle)
    ///
    /// The headless document has no stylesheets: the computed value is the
    /// inline value if present, otherwise the property's initial value.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn computed_style(&self, id: NodeId, property: &str) -> Result<String, DomError> {
        let data = self.element(id)?;
        Ok(data.style.get(property).map_or_else(
            || style::initial_value(property).to_string(),
            str::to_string,
        ))
    }

    /// Return the element's id, generating a unique `trellis-N` id first if
    /// it has none.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] or [`DomError::UnknownNode`].
    pub fn ensure_id(&mut self, id: NodeId) -> Result<String, DomError> {
        if let Some(existing) = self.element(id)?.id() {
            return Ok(existing.clone());
        }
        let generated = self.ids.next_id();
        let _ = self
            .element_mut(id)?
            .attrs
            .insert("id".to_string(), generated.clone());
        Ok(generated)
    }

    /// Rewind the generated-id sequence.
    pub const fn reset_ids(&mut self) {
        self.ids.reset();
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_helpers() {
        let mut data = ElementData::new("DIV");
        assert_eq!(data.tag_name, "div");
        assert!(data.add_class("a"));
        assert!(data.add_class("b"));
        assert!(!data.add_class("a"));
        assert_eq!(data.attrs.get("class").map(String::as_str), Some("a b"));
        assert!(data.remove_class("a"));
        assert!(!data.remove_class("zzz"));
        assert_eq!(data.attrs.get("class").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_attribute_name_validation() {
        assert!(validate_attribute_name("data-x").is_ok());
        assert!(validate_attribute_name("").is_err());
        assert!(validate_attribute_name("a b").is_err());
        assert!(validate_attribute_name("a=b").is_err());
    }

    #[test]
    fn test_style_attribute_round_trip() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "style", "left: 4px; top: 2px")
            .unwrap();
        assert_eq!(
            tree.get_attribute(div, "style").unwrap().as_deref(),
            Some("left: 4px; top: 2px;")
        );
        assert_eq!(tree.computed_style(div, "left").unwrap(), "4px");
        assert_eq!(tree.computed_style(div, "margin-left").unwrap(), "0px");
    }
}
