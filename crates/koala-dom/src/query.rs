//! Element queries over a [`DomTree`].
//!
//! [§ 4.2.6 Mixin ParentNode](https://dom.spec.whatwg.org/#interface-parentnode)
//!
//! Every query walks the given nodes in tree order: "An object A is preceding
//! an object B if A and B are in the same tree and A comes before B in tree
//! order", where tree order is "preorder, depth-first traversal of a tree".
//!
//! The walk keeps an explicit stack instead of recursing, so deep documents
//! cannot exhaust the call stack. Non-element nodes never match, but their
//! children are still visited.
//!
//! All queries take the tree by shared reference; the tree is therefore
//! frozen for the duration of a call. Results are plain [`NodeId`]s and are
//! not kept live across later mutations.

use crate::{DomTree, ElementData, NodeId, NodeType};

/// A condition on a single element, evaluated during a query.
///
/// Matching must not have side effects. The tree is passed so that matchers
/// which look at ancestors (e.g. descendant combinators) can do so.
pub trait ElementMatcher {
    /// Returns true if the element `id` satisfies this matcher.
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool;
}

impl<F> ElementMatcher for F
where
    F: Fn(&DomTree, NodeId) -> bool,
{
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self(tree, id)
    }
}

/// Adapts a predicate on [`ElementData`] alone into an [`ElementMatcher`].
///
/// ```
/// use koala_dom::query::ElementPredicate;
///
/// let has_cls = ElementPredicate(|e: &koala_dom::ElementData| e.has_class("cls"));
/// # let _ = has_cls;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ElementPredicate<F>(pub F);

impl<F> ElementMatcher for ElementPredicate<F>
where
    F: Fn(&ElementData) -> bool,
{
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        tree.as_element(id).is_some_and(|e| (self.0)(e))
    }
}

/// Pre-order, depth-first iterator over the elements below a list of nodes.
///
/// The starting nodes themselves are included when they are elements.
pub struct PreOrderElements<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderElements<'a> {
    /// Start a walk over `nodes` and all of their descendants.
    #[must_use]
    pub fn new(tree: &'a DomTree, nodes: &[NodeId]) -> Self {
        Self {
            tree,
            stack: nodes.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderElements<'a> {
    type Item = (NodeId, &'a ElementData);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            // Reversed so the first child is popped next.
            self.stack.extend(node.children.iter().rev().copied());
            if let NodeType::Element(data) = &node.node_type {
                return Some((id, data));
            }
        }
        None
    }
}

/// [§ 4.2.6 querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
///
/// Returns the first element in tree order, among `children` and their
/// descendants, that `matcher` accepts. Stops at the first match.
pub fn find_first<M: ElementMatcher + ?Sized>(
    tree: &DomTree,
    children: &[NodeId],
    matcher: &M,
) -> Option<NodeId> {
    PreOrderElements::new(tree, children)
        .find(|&(id, _)| matcher.matches(tree, id))
        .map(|(id, _)| id)
}

/// [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
///
/// Appends every element accepted by `matcher` to `out`, in tree order.
/// `out` is neither cleared nor replaced.
pub fn find_all<M: ElementMatcher + ?Sized>(
    tree: &DomTree,
    children: &[NodeId],
    matcher: &M,
    out: &mut Vec<NodeId>,
) {
    out.extend(
        PreOrderElements::new(tree, children)
            .filter(|&(id, _)| matcher.matches(tree, id))
            .map(|(id, _)| id),
    );
}

/// [§ 4.4 list of elements with class names](https://dom.spec.whatwg.org/#concept-getelementsbyclassname)
///
/// Appends every element whose class set contains all of `classes`.
pub fn find_by_class<S: AsRef<str>>(
    tree: &DomTree,
    children: &[NodeId],
    classes: &[S],
    out: &mut Vec<NodeId>,
) {
    out.extend(
        PreOrderElements::new(tree, children)
            .filter(|(_, element)| element.has_all_classes(classes))
            .map(|(id, _)| id),
    );
}

/// [§ 4.4 list of elements with qualified name](https://dom.spec.whatwg.org/#concept-getelementsbytagname)
///
/// Appends every element whose tag name equals `name`, ignoring ASCII case.
/// `None` and `"*"` match every element.
pub fn find_by_tag_name(
    tree: &DomTree,
    children: &[NodeId],
    name: Option<&str>,
    out: &mut Vec<NodeId>,
) {
    let name = name.filter(|n| *n != "*");
    out.extend(
        PreOrderElements::new(tree, children)
            .filter(|(_, element)| name.is_none_or(|n| element.tag_name.eq_ignore_ascii_case(n)))
            .map(|(id, _)| id),
    );
}

/// [§ 4.4 list of elements with namespace and local name](https://dom.spec.whatwg.org/#concept-getelementsbytagnamens)
///
/// Appends every element in `namespace` whose local name equals `local_name`.
///
/// The namespace is compared exactly, including case. The local name is
/// compared ignoring ASCII case; `None` and `"*"` match any local name.
pub fn find_by_tag_name_ns(
    tree: &DomTree,
    children: &[NodeId],
    namespace: Option<&str>,
    local_name: Option<&str>,
    out: &mut Vec<NodeId>,
) {
    let local_name = local_name.filter(|n| *n != "*");
    out.extend(
        PreOrderElements::new(tree, children)
            .filter(|(_, element)| {
                element.namespace.as_deref() == namespace
                    && local_name.is_none_or(|n| element.local_name().eq_ignore_ascii_case(n))
            })
            .map(|(id, _)| id),
    );
}
