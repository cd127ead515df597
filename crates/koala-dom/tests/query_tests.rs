//! Tests for tree-order element queries: find_first, find_all and the
//! getElementsBy* family.

use koala_dom::query::{ElementPredicate, PreOrderElements};
use koala_dom::{
    DomTree, ElementData, HTML_NAMESPACE, NodeId, NodeType, SVG_NAMESPACE, find_all,
    find_by_class, find_by_tag_name, find_by_tag_name_ns, find_first,
};

/// Helper to append an element with an optional class attribute.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str, class: Option<&str>) -> NodeId {
    let mut data = ElementData::new(tag);
    if let Some(class) = class {
        data = data.with_attr("class", class);
    }
    tree.append_element(parent, data)
}

/// `div > (span.cls, a)` under the document root.
fn small_tree() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div", None);
    let span = element(&mut tree, div, "span", Some("cls"));
    let a = element(&mut tree, div, "a", None);
    (tree, div, span, a)
}

/// ```text
/// html
/// ├── head
/// │   └── title.x
/// └── body.x
///     ├── "text"
///     ├── p.x.y
///     │   └── em.y
///     └── section
///         └── p.y
/// ```
fn deep_tree() -> (DomTree, Vec<NodeId>) {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html", None);
    let head = element(&mut tree, html, "head", None);
    let title = element(&mut tree, head, "title", Some("x"));
    let body = element(&mut tree, html, "body", Some("x"));
    let _ = tree.append_text(body, "text");
    let p1 = element(&mut tree, body, "p", Some("x y"));
    let em = element(&mut tree, p1, "em", Some("y"));
    let section = element(&mut tree, body, "section", None);
    let p2 = element(&mut tree, section, "p", Some("y"));
    (tree, vec![html, head, title, body, p1, em, section, p2])
}

fn has_class(name: &'static str) -> ElementPredicate<impl Fn(&ElementData) -> bool> {
    ElementPredicate(move |e: &ElementData| e.has_class(name))
}

// ========== find_first ==========

#[test]
fn test_find_first_returns_first_in_document_order() {
    let (tree, _, span, _) = small_tree();
    let found = find_first(&tree, tree.children(NodeId::ROOT), &has_class("cls"));
    assert_eq!(found, Some(span));
}

#[test]
fn test_find_first_prefers_ancestor_over_descendant() {
    let (tree, nodes) = deep_tree();
    // body.x precedes p.x.y, and title.x precedes both.
    let found = find_first(&tree, tree.children(NodeId::ROOT), &has_class("x"));
    assert_eq!(found, Some(nodes[2]));
}

#[test]
fn test_find_first_descends_before_visiting_next_sibling() {
    let (tree, nodes) = deep_tree();
    // em.y (inside the first p) comes before section > p.y
    let is_em_or_section_p = |tree: &DomTree, id: NodeId| {
        tree.as_element(id)
            .is_some_and(|e| e.tag_name == "em" || (e.tag_name == "p" && !e.has_class("x")))
    };
    let found = find_first(&tree, tree.children(NodeId::ROOT), &is_em_or_section_p);
    assert_eq!(found, Some(nodes[5]));
}

#[test]
fn test_find_first_no_match() {
    let (tree, _, _, _) = small_tree();
    let found = find_first(&tree, tree.children(NodeId::ROOT), &has_class("missing"));
    assert_eq!(found, None);
}

#[test]
fn test_find_first_empty_input() {
    let tree = DomTree::new();
    assert_eq!(find_first(&tree, &[], &has_class("cls")), None);
}

#[test]
fn test_find_first_stops_at_first_match() {
    use std::cell::Cell;

    let (tree, nodes) = deep_tree();
    let calls = Cell::new(0);
    let counting = |tree: &DomTree, id: NodeId| {
        calls.set(calls.get() + 1);
        tree.as_element(id).is_some_and(|e| e.tag_name == "title")
    };
    let found = find_first(&tree, tree.children(NodeId::ROOT), &counting);
    assert_eq!(found, Some(nodes[2]));
    // html, head, title and nothing after
    assert_eq!(calls.get(), 3);
}

// ========== find_all ==========

#[test]
fn test_find_all_single_match() {
    let (tree, _, span, _) = small_tree();
    let mut out = Vec::new();
    find_all(&tree, tree.children(NodeId::ROOT), &has_class("cls"), &mut out);
    assert_eq!(out, vec![span]);
}

#[test]
fn test_find_all_in_document_order() {
    let (tree, nodes) = deep_tree();
    let mut out = Vec::new();
    find_all(&tree, tree.children(NodeId::ROOT), &has_class("y"), &mut out);
    assert_eq!(out, vec![nodes[4], nodes[5], nodes[7]]);
}

#[test]
fn test_find_all_appends_to_existing_buffer() {
    let (tree, _, span, _) = small_tree();
    let sentinel = NodeId(999);
    let mut out = vec![sentinel];
    find_all(&tree, tree.children(NodeId::ROOT), &has_class("cls"), &mut out);
    assert_eq!(out, vec![sentinel, span]);
}

#[test]
fn test_find_all_count_matches_filter() {
    let (tree, _) = deep_tree();
    let is_p = ElementPredicate(|e: &ElementData| e.tag_name == "p");
    let mut out = Vec::new();
    find_all(&tree, tree.children(NodeId::ROOT), &is_p, &mut out);

    let expected: Vec<NodeId> = PreOrderElements::new(&tree, tree.children(NodeId::ROOT))
        .filter(|(_, e)| e.tag_name == "p")
        .map(|(id, _)| id)
        .collect();
    assert_eq!(out.len(), 2);
    assert_eq!(out, expected);
}

#[test]
fn test_non_element_nodes_are_skipped_but_children_visited() {
    let mut tree = DomTree::new();
    let wrapper = tree.alloc(NodeType::Comment("wrapper".to_string()));
    tree.append_child(NodeId::ROOT, wrapper);
    let inner = element(&mut tree, wrapper, "span", Some("cls"));

    let mut out = Vec::new();
    find_all(&tree, tree.children(NodeId::ROOT), &has_class("cls"), &mut out);
    assert_eq!(out, vec![inner]);
}

#[test]
fn test_walk_handles_very_deep_trees() {
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..100_000 {
        parent = element(&mut tree, parent, "div", None);
    }
    let leaf = element(&mut tree, parent, "span", Some("leaf"));

    let found = find_first(&tree, tree.children(NodeId::ROOT), &has_class("leaf"));
    assert_eq!(found, Some(leaf));
}

// ========== find_by_class ==========

#[test]
fn test_find_by_class_requires_all_classes() {
    let (tree, nodes) = deep_tree();
    let mut out = Vec::new();
    let classes = vec!["y".to_string(), "x".to_string()];
    find_by_class(&tree, tree.children(NodeId::ROOT), &classes, &mut out);
    assert_eq!(out, vec![nodes[4]]);
}

#[test]
fn test_find_by_class_includes_non_leaf_matches() {
    let (tree, nodes) = deep_tree();
    let mut out = Vec::new();
    find_by_class(&tree, tree.children(NodeId::ROOT), &["x"], &mut out);
    // title is a leaf, body and p are not; all are included.
    assert_eq!(out, vec![nodes[2], nodes[3], nodes[4]]);
}

#[test]
fn test_get_elements_by_class_name_splits_whitespace() {
    let (tree, nodes) = deep_tree();
    assert_eq!(
        tree.get_elements_by_class_name(NodeId::ROOT, "  y\tx "),
        vec![nodes[4]]
    );
    assert!(tree.get_elements_by_class_name(NodeId::ROOT, "   ").is_empty());
}

// ========== find_by_tag_name ==========

#[test]
fn test_find_by_tag_name_none_returns_every_element() {
    let (tree, div, span, a) = small_tree();
    let mut out = Vec::new();
    find_by_tag_name(&tree, tree.children(NodeId::ROOT), None, &mut out);
    assert_eq!(out, vec![div, span, a]);
}

#[test]
fn test_find_by_tag_name_wildcard_returns_every_element() {
    let (tree, nodes) = deep_tree();
    let mut out = Vec::new();
    find_by_tag_name(&tree, tree.children(NodeId::ROOT), Some("*"), &mut out);
    assert_eq!(out, nodes);
}

#[test]
fn test_find_by_tag_name_ignores_case() {
    let (tree, nodes) = deep_tree();
    let mut out = Vec::new();
    find_by_tag_name(&tree, tree.children(NodeId::ROOT), Some("P"), &mut out);
    assert_eq!(out, vec![nodes[4], nodes[7]]);
}

#[test]
fn test_get_elements_by_tag_name_scoped_to_descendants() {
    let (tree, nodes) = deep_tree();
    let section = nodes[6];
    assert_eq!(tree.get_elements_by_tag_name(section, "p"), vec![nodes[7]]);
    // the scope itself is not included
    assert!(tree.get_elements_by_tag_name(section, "section").is_empty());
}

// ========== find_by_tag_name_ns ==========

fn mixed_namespace_tree() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let svg = tree.append_element(body, ElementData::new_ns(Some(SVG_NAMESPACE), "svg"));
    let rect = tree.append_element(svg, ElementData::new_ns(Some(SVG_NAMESPACE), "svg:Rect"));
    (tree, body, svg, rect)
}

#[test]
fn test_find_by_tag_name_ns_local_name_ignores_case() {
    let (tree, _, _, rect) = mixed_namespace_tree();
    let mut out = Vec::new();
    find_by_tag_name_ns(
        &tree,
        tree.children(NodeId::ROOT),
        Some(SVG_NAMESPACE),
        Some("rect"),
        &mut out,
    );
    assert_eq!(out, vec![rect]);
}

#[test]
fn test_find_by_tag_name_ns_namespace_is_case_sensitive() {
    let (tree, _, _, _) = mixed_namespace_tree();
    let mut out = Vec::new();
    find_by_tag_name_ns(
        &tree,
        tree.children(NodeId::ROOT),
        Some("http://www.w3.org/2000/SVG"),
        Some("rect"),
        &mut out,
    );
    assert!(out.is_empty());
}

#[test]
fn test_find_by_tag_name_ns_wildcard_local_name() {
    let (tree, body, svg, rect) = mixed_namespace_tree();
    let mut out = Vec::new();
    find_by_tag_name_ns(
        &tree,
        tree.children(NodeId::ROOT),
        Some(SVG_NAMESPACE),
        None,
        &mut out,
    );
    assert_eq!(out, vec![svg, rect]);

    out.clear();
    find_by_tag_name_ns(
        &tree,
        tree.children(NodeId::ROOT),
        Some(HTML_NAMESPACE),
        Some("*"),
        &mut out,
    );
    assert_eq!(out, vec![body]);
}

#[test]
fn test_find_by_tag_name_ns_null_namespace() {
    let mut tree = DomTree::new();
    let plain = tree.append_element(NodeId::ROOT, ElementData::new_ns(None, "item"));
    let _ = tree.append_element(plain, ElementData::new("item"));

    assert_eq!(
        tree.get_elements_by_tag_name_ns(NodeId::ROOT, Some(""), "item"),
        vec![plain]
    );
}

// ========== element data ==========

#[test]
fn test_local_name_and_prefix() {
    let rect = ElementData::new_ns(Some(SVG_NAMESPACE), "svg:rect");
    assert_eq!(rect.local_name(), "rect");
    assert_eq!(rect.prefix(), Some("svg"));

    let div = ElementData::new("div");
    assert_eq!(div.local_name(), "div");
    assert_eq!(div.prefix(), None);
}

#[test]
fn test_query_selector_with_closure() {
    let (tree, _, _, a) = small_tree();
    let is_anchor =
        |tree: &DomTree, id: NodeId| tree.as_element(id).is_some_and(|e| e.tag_name == "a");
    assert_eq!(tree.query_selector(NodeId::ROOT, &is_anchor), Some(a));
    assert_eq!(tree.query_selector_all(NodeId::ROOT, &is_anchor), vec![a]);
}
