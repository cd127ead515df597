//! DOM tree and element queries for the Koala style core.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), plus the query engine
//! behind `querySelector` and the `getElementsBy*` family.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Queries
//! borrow the tree immutably, so the tree cannot change under a traversal.

pub mod query;

use std::collections::{HashMap, HashSet};

pub use query::{
    ElementMatcher, find_all, find_by_class, find_by_tag_name, find_by_tag_name_ns, find_first,
};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// [§ 2.2 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// [§ 2.2 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// "The SVG namespace is "http://www.w3.org/2000/svg"."
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
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
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name, ..."
///
/// The qualified name is stored as written (`svg:rect` or `div`); prefix and
/// local name are derived from it.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's qualified name, e.g. `div` or `svg:rect`.
    pub tag_name: String,
    /// "An element's namespace". `None` means the null namespace.
    pub namespace: Option<String>,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create an element in the [`HTML_NAMESPACE`] with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self::new_ns(Some(HTML_NAMESPACE), tag_name)
    }

    /// [§ 4.5 createElementNS](https://dom.spec.whatwg.org/#dom-document-createelementns)
    ///
    /// Create an element with an explicit (possibly null) namespace.
    #[must_use]
    pub fn new_ns(namespace: Option<&str>, qualified_name: impl Into<String>) -> Self {
        Self {
            tag_name: qualified_name.into(),
            namespace: namespace.map(str::to_string),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Returns the element's local name: the qualified name without its prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.tag_name
            .split_once(':')
            .map_or(self.tag_name.as_str(), |(_, local)| local)
    }

    /// Returns the namespace prefix, if the qualified name has one.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.tag_name.split_once(':').map(|(prefix, _)| prefix)
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
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// True if the class attribute contains `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// True if the element's class set is a superset of `class_names`.
    ///
    /// An empty request is trivially satisfied.
    #[must_use]
    pub fn has_all_classes<S: AsRef<str>>(&self, class_names: &[S]) -> bool {
        if class_names.is_empty() {
            return true;
        }
        let classes = self.classes();
        class_names.iter().all(|c| classes.contains(c.as_ref()))
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by NodeId.
    /// The Document node is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        DomTree {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
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
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(NodeType::Element(data));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node and append it to `parent` in one step.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeType::Text(text.into()));
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
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

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.2.6 querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
    ///
    /// "Return the first result of running scope-match a selectors string
    /// selectors against this, if the result is not an empty list; otherwise null."
    ///
    /// Searches the descendants of `scope` (not `scope` itself).
    #[must_use]
    pub fn query_selector<M: ElementMatcher + ?Sized>(
        &self,
        scope: NodeId,
        matcher: &M,
    ) -> Option<NodeId> {
        find_first(self, self.children(scope), matcher)
    }

    /// [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
    ///
    /// All descendants of `scope` matched by `matcher`, in tree order.
    #[must_use]
    pub fn query_selector_all<M: ElementMatcher + ?Sized>(
        &self,
        scope: NodeId,
        matcher: &M,
    ) -> Vec<NodeId> {
        let mut result = Vec::new();
        find_all(self, self.children(scope), matcher, &mut result);
        result
    }

    /// [§ 4.4 getElementsByClassName](https://dom.spec.whatwg.org/#dom-document-getelementsbyclassname)
    ///
    /// "The getElementsByClassName(classNames) method steps are to return the
    /// list of elements with class names classNames for this."
    ///
    /// `class_names` is split on ASCII whitespace; an empty token set matches
    /// nothing, matching the DOM's behavior.
    #[must_use]
    pub fn get_elements_by_class_name(&self, scope: NodeId, class_names: &str) -> Vec<NodeId> {
        let classes: Vec<String> = class_names
            .split_ascii_whitespace()
            .map(str::to_string)
            .collect();
        let mut result = Vec::new();
        if !classes.is_empty() {
            find_by_class(self, self.children(scope), &classes, &mut result);
        }
        result
    }

    /// [§ 4.4 getElementsByTagName](https://dom.spec.whatwg.org/#dom-document-getelementsbytagname)
    ///
    /// `"*"` matches every element.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        let mut result = Vec::new();
        find_by_tag_name(self, self.children(scope), Some(name), &mut result);
        result
    }

    /// [§ 4.4 getElementsByTagNameNS](https://dom.spec.whatwg.org/#dom-document-getelementsbytagnamens)
    ///
    /// "If namespace is the empty string, then set it to null."
    #[must_use]
    pub fn get_elements_by_tag_name_ns(
        &self,
        scope: NodeId,
        namespace: Option<&str>,
        local_name: &str,
    ) -> Vec<NodeId> {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let mut result = Vec::new();
        find_by_tag_name_ns(
            self,
            self.children(scope),
            namespace,
            Some(local_name),
            &mut result,
        );
        result
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
