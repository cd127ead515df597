//! CSS Selector parsing and matching
//!
//! This module implements the structural subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) needed to drive
//! element queries: type, universal, class, ID and attribute selectors,
//! compound selectors, the four combinators, and selector lists.
//! Pseudo-classes and pseudo-elements are not supported and make a selector
//! fail to parse.

use core::fmt;
use core::iter::Peekable;
use core::str::Chars;

use koala_dom::query::ElementMatcher;
use koala_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Compared against the element's local name, ignoring ASCII case.
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    Id(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]` "Represents an element with the att attribute"
    Exists(String),
    /// `[attr=value]` exact value
    Equals(String, String),
    /// `[attr~=value]` one of the whitespace-separated words
    Includes(String, String),
    /// `[attr|=value]` exactly `value` or starting with `value-`
    DashMatch(String, String),
    /// `[attr^=value]` prefix
    PrefixMatch(String, String),
    /// `[attr$=value]` suffix
    SuffixMatch(String, String),
    /// `[attr*=value]` substring
    SubstringMatch(String, String),
}

impl AttributeSelector {
    fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }

    fn matches(&self, element: &ElementData) -> bool {
        let Some(actual) = element.attrs.get(self.name()) else {
            return false;
        };
        match self {
            Self::Exists(_) => true,
            Self::Equals(_, val) => actual == val,
            Self::Includes(_, val) => actual.split_ascii_whitespace().any(|w| w == val),
            Self::DashMatch(_, val) => {
                actual == val
                    || actual
                        .strip_prefix(val.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            // "If 'val' is the empty string then the selector does not represent anything."
            Self::PrefixMatch(_, val) => !val.is_empty() && actual.starts_with(val.as_str()),
            Self::SuffixMatch(_, val) => !val.is_empty() && actual.ends_with(val.as_str()),
            Self::SubstringMatch(_, val) => !val.is_empty() && actual.contains(val.as_str()),
        }
    }
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.local_name().eq_ignore_ascii_case(name),
            Self::Universal => true,
            Self::Class(class_name) => element.has_class(class_name),
            Self::Id(id) => element.id().is_some_and(|el_id| el_id == id),
            Self::Attribute(attr) => attr.matches(element),
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn matches_node(&self, tree: &DomTree, node_id: NodeId) -> bool {
        tree.as_element(node_id)
            .is_some_and(|element| self.simple_selectors.iter().all(|s| s.matches(element)))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`: B is an arbitrary descendant of A.
    Descendant,
    /// `A > B`: B is a direct child of A.
    Child,
    /// `A + B`: B immediately follows A among element siblings.
    NextSibling,
    /// `A ~ B`: B follows A among element siblings.
    SubsequentSibling,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// `A > B C` is stored as subject `C` with combinators
/// `[(Descendant, B), (Child, A)]`: right to left, the order matching
/// walks in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound selector, the one the matched element satisfies.
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    #[must_use]
    pub fn calculate_specificity(&self) -> Specificity {
        core::iter::once(&self.subject)
            .chain(self.combinators.iter().map(|(_, compound)| compound))
            .flat_map(|compound| &compound.simple_selectors)
            .fold(Specificity::default(), |Specificity(a, b, c), simple| match simple {
                // "count the number of ID selectors in the selector (= A)"
                SimpleSelector::Id(_) => Specificity(a + 1, b, c),
                // "count the number of class selectors, attributes selectors,
                // and pseudo-classes in the selector (= B)"
                SimpleSelector::Class(_) | SimpleSelector::Attribute(_) => {
                    Specificity(a, b + 1, c)
                }
                // "count the number of type selectors and pseudo-elements (= C)"
                SimpleSelector::Type(_) => Specificity(a, b, c + 1),
                // "ignore the universal selector"
                SimpleSelector::Universal => Specificity(a, b, c),
            })
    }

    /// Match the combinator chain starting at `index`, where `node_id` is the
    /// element matched by the compound to the right of it.
    ///
    /// Descendant and subsequent-sibling steps backtrack: if the nearest
    /// candidate fails the rest of the chain, farther ones are tried.
    fn matches_from(&self, index: usize, tree: &DomTree, node_id: NodeId) -> bool {
        let Some((combinator, compound)) = self.combinators.get(index) else {
            return true;
        };
        let next = |candidate: NodeId| {
            compound.matches_node(tree, candidate) && self.matches_from(index + 1, tree, candidate)
        };
        match combinator {
            Combinator::Descendant => tree.ancestors(node_id).any(next),
            Combinator::Child => tree.parent(node_id).is_some_and(next),
            Combinator::NextSibling => preceding_element_siblings(tree, node_id)
                .next()
                .is_some_and(next),
            Combinator::SubsequentSibling => preceding_element_siblings(tree, node_id).any(next),
        }
    }
}

/// Element siblings before `node_id`, nearest first.
fn preceding_element_siblings(tree: &DomTree, node_id: NodeId) -> impl Iterator<Item = NodeId> {
    let siblings = tree.parent(node_id).map_or(&[][..], |parent| tree.children(parent));
    let position = siblings
        .iter()
        .position(|&id| id == node_id)
        .unwrap_or(0);
    siblings[..position]
        .iter()
        .rev()
        .copied()
        .filter(move |&id| tree.as_element(id).is_some())
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// `(A, B, C)`: ID selectors; class, attribute and pseudo-class selectors;
/// type selectors. Compared component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A parsed CSS selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The complex selector (compound selectors with combinators).
    pub complex: ComplexSelector,
    /// The specificity of this selector.
    pub specificity: Specificity,
}

impl ParsedSelector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Whether the element `node_id` of `tree` matches. Non-element nodes
    /// never match.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        self.complex.subject.matches_node(tree, node_id)
            && self.complex.matches_from(0, tree, node_id)
    }
}

impl ElementMatcher for ParsedSelector {
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.matches_in_tree(tree, id)
    }
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#selector-list)
///
/// "A selector list is a comma-separated list of selectors. ... it
/// represents the union of all elements selected by each of the individual
/// selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ParsedSelector>);

impl SelectorList {
    /// The highest specificity among the selectors that match `node_id`.
    #[must_use]
    pub fn matching_specificity(&self, tree: &DomTree, node_id: NodeId) -> Option<Specificity> {
        self.0
            .iter()
            .filter(|selector| selector.matches_in_tree(tree, node_id))
            .map(|selector| selector.specificity)
            .max()
    }
}

impl ElementMatcher for SelectorList {
    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.0.iter().any(|selector| selector.matches_in_tree(tree, id))
    }
}

/// Parse a comma-separated selector list.
///
/// Returns `None` if any selector in the list is invalid: "If any selector
/// in the list is invalid, the entire list is invalid."
#[must_use]
pub fn parse_selector_list(raw: &str) -> Option<SelectorList> {
    split_top_level_commas(raw)
        .into_iter()
        .map(parse_selector)
        .collect::<Option<Vec<_>>>()
        .map(SelectorList)
}

/// Parse a raw selector string into a `ParsedSelector`.
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Returns `None` for empty input, dangling combinators, and unsupported
/// syntax such as pseudo-classes.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<ParsedSelector> {
    let mut parser = SelectorParser {
        chars: raw.trim().chars().peekable(),
    };

    let mut compounds = vec![parser.parse_compound()?];
    let mut combinators_between = Vec::new();
    loop {
        let had_whitespace = parser.skip_whitespace();
        if parser.chars.peek().is_none() {
            break;
        }
        combinators_between.push(parser.parse_combinator(had_whitespace)?);
        compounds.push(parser.parse_compound()?);
    }

    // Parsed left to right; stored right to left.
    let subject = compounds.pop()?;
    let combinators = combinators_between
        .into_iter()
        .rev()
        .zip(compounds.into_iter().rev())
        .collect();
    let complex = ComplexSelector {
        subject,
        combinators,
    };
    let specificity = complex.calculate_specificity();
    Some(ParsedSelector {
        complex,
        specificity,
    })
}

struct SelectorParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl SelectorParser<'_> {
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(char::is_ascii_whitespace).is_some() {
            skipped = true;
        }
        skipped
    }

    /// The combinator between two compounds, after leading whitespace was
    /// skipped. Bare whitespace is the descendant combinator.
    fn parse_combinator(&mut self, had_whitespace: bool) -> Option<Combinator> {
        let combinator = match self.chars.peek()? {
            '>' => Combinator::Child,
            '+' => Combinator::NextSibling,
            '~' => Combinator::SubsequentSibling,
            _ if had_whitespace => return Some(Combinator::Descendant),
            _ => return None,
        };
        let _ = self.chars.next();
        let _ = self.skip_whitespace();
        Some(combinator)
    }

    fn parse_compound(&mut self) -> Option<CompoundSelector> {
        let mut simple_selectors = Vec::new();
        match self.chars.peek() {
            Some('*') => {
                let _ = self.chars.next();
                simple_selectors.push(SimpleSelector::Universal);
            }
            Some(&c) if is_ident_start_char(c) || c == '-' => {
                simple_selectors.push(SimpleSelector::Type(self.parse_ident()?));
            }
            _ => {}
        }
        loop {
            let simple = match self.chars.peek() {
                Some('.') => {
                    let _ = self.chars.next();
                    SimpleSelector::Class(self.parse_ident()?)
                }
                Some('#') => {
                    let _ = self.chars.next();
                    SimpleSelector::Id(self.parse_name()?)
                }
                Some('[') => {
                    let _ = self.chars.next();
                    SimpleSelector::Attribute(self.parse_attribute()?)
                }
                _ => break,
            };
            simple_selectors.push(simple);
        }
        if simple_selectors.is_empty() {
            return None;
        }
        Some(CompoundSelector { simple_selectors })
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn parse_ident(&mut self) -> Option<String> {
        let first = *self.chars.peek()?;
        if !(is_ident_start_char(first) || first == '-') {
            return None;
        }
        self.parse_name()
    }

    fn parse_name(&mut self) -> Option<String> {
        let mut name = String::new();
        while let Some(c) = self.chars.next_if(|&c| is_ident_char(c)) {
            name.push(c);
        }
        (!name.is_empty()).then_some(name)
    }

    /// After the `[`: `name]` or `name op value]`.
    fn parse_attribute(&mut self) -> Option<AttributeSelector> {
        let _ = self.skip_whitespace();
        let name = self.parse_ident()?;
        let _ = self.skip_whitespace();
        let op = match self.chars.next()? {
            ']' => return Some(AttributeSelector::Exists(name)),
            '=' => '=',
            op @ ('~' | '|' | '^' | '$' | '*') if self.chars.next_if_eq(&'=').is_some() => op,
            _ => return None,
        };
        let _ = self.skip_whitespace();
        let value = self.parse_attr_value()?;
        let _ = self.skip_whitespace();
        if self.chars.next()? != ']' {
            return None;
        }
        Some(match op {
            '~' => AttributeSelector::Includes(name, value),
            '|' => AttributeSelector::DashMatch(name, value),
            '^' => AttributeSelector::PrefixMatch(name, value),
            '$' => AttributeSelector::SuffixMatch(name, value),
            '*' => AttributeSelector::SubstringMatch(name, value),
            _ => AttributeSelector::Equals(name, value),
        })
    }

    /// A quoted string or an ident.
    fn parse_attr_value(&mut self) -> Option<String> {
        match *self.chars.peek()? {
            q @ ('"' | '\'') => {
                let _ = self.chars.next();
                let mut value = String::new();
                loop {
                    match self.chars.next()? {
                        c if c == q => return Some(value),
                        '\\' => value.push(self.chars.next()?),
                        c => value.push(c),
                    }
                }
            }
            _ => self.parse_ident(),
        }
    }
}

/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Split on commas that are not inside quotes or brackets.
fn split_top_level_commas(raw: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                pieces.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&raw[start..]);
    pieces
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (op, value) = match self {
            Self::Exists(name) => return write!(f, "[{name}]"),
            Self::Equals(_, v) => ("=", v),
            Self::Includes(_, v) => ("~=", v),
            Self::DashMatch(_, v) => ("|=", v),
            Self::PrefixMatch(_, v) => ("^=", v),
            Self::SuffixMatch(_, v) => ("$=", v),
            Self::SubstringMatch(_, v) => ("*=", v),
        };
        write!(f, "[{}{op}\"{}\"]", self.name(), value.replace('"', "\\\""))
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Universal => f.write_str("*"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Attribute(attr) => write!(f, "{attr}"),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.simple_selectors
            .iter()
            .try_for_each(|simple| write!(f, "{simple}"))
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        })
    }
}

/// [CSSOM § 6.7.4 Serializing Selectors](https://drafts.csswg.org/cssom/#serializing-selectors)
impl fmt::Display for ParsedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (combinator, compound) in self.complex.combinators.iter().rev() {
            write!(f, "{compound}{combinator}")?;
        }
        write!(f, "{}", self.complex.subject)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
