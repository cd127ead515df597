//! The `--tree` notation: a compact description of an element tree.
//!
//! ```text
//! div#main > (h1, p.intro > a[href=/about], "some text", svg:rect)
//! ```
//!
//! A node is an element (`tag`, then any of `.class`, `#id`,
//! `[name]`, `[name=value]`) or a quoted text node. `>` gives an element
//! one child, or several in parentheses separated by commas. The tag may be
//! omitted (`.note` is a `div`); an `svg:` prefix puts the element in the
//! SVG namespace.

use core::iter::Peekable;
use core::str::CharIndices;

use anyhow::{Result, bail};
use koala_dom::{DomTree, ElementData, NodeId, SVG_NAMESPACE};

/// Build a tree from its description. Top-level nodes become children of
/// the document.
pub fn build_tree(spec: &str) -> Result<DomTree> {
    let mut parser = TreeSpecParser {
        chars: spec.char_indices().peekable(),
        source: spec,
    };
    let mut tree = DomTree::new();
    parser.parse_node_list(&mut tree, NodeId::ROOT)?;
    parser.skip_whitespace();
    if parser.chars.peek().is_some() {
        bail!(parser.error("unexpected input"));
    }
    Ok(tree)
}

struct TreeSpecParser<'a> {
    chars: Peekable<CharIndices<'a>>,
    source: &'a str,
}

impl TreeSpecParser<'_> {
    fn error(&mut self, message: &str) -> String {
        let position = self.chars.peek().map_or(self.source.len(), |&(i, _)| i);
        format!("{message} at offset {position} in tree '{}'", self.source)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn parse_node_list(&mut self, tree: &mut DomTree, parent: NodeId) -> Result<()> {
        loop {
            self.parse_node(tree, parent)?;
            self.skip_whitespace();
            if !self.eat(',') {
                return Ok(());
            }
        }
    }

    fn parse_node(&mut self, tree: &mut DomTree, parent: NodeId) -> Result<()> {
        self.skip_whitespace();
        if let Some(&(_, quote @ ('"' | '\''))) = self.chars.peek() {
            let _ = self.chars.next();
            let text = self.parse_quoted(quote)?;
            let _ = tree.append_text(parent, text);
            return Ok(());
        }

        let element = self.parse_element()?;
        let id = tree.append_element(parent, element);
        self.skip_whitespace();
        if self.eat('>') {
            self.skip_whitespace();
            if self.eat('(') {
                self.parse_node_list(tree, id)?;
                self.skip_whitespace();
                if !self.eat(')') {
                    bail!(self.error("expected ')'"));
                }
            } else {
                self.parse_node(tree, id)?;
            }
        }
        Ok(())
    }

    fn parse_element(&mut self) -> Result<ElementData> {
        let tag = self.parse_name();
        let mut element = if tag.starts_with("svg:") {
            ElementData::new_ns(Some(SVG_NAMESPACE), tag.as_str())
        } else if tag.is_empty() {
            ElementData::new("div")
        } else {
            ElementData::new(tag.as_str())
        };
        let mut classes = Vec::new();

        loop {
            if self.eat('.') {
                classes.push(self.parse_required_name("class name")?);
            } else if self.eat('#') {
                let id = self.parse_required_name("id")?;
                element = element.with_attr("id", id);
            } else if self.eat('[') {
                let name = self.parse_required_name("attribute name")?;
                let value = if self.eat('=') {
                    match self.chars.peek() {
                        Some(&(_, quote @ ('"' | '\''))) => {
                            let _ = self.chars.next();
                            self.parse_quoted(quote)?
                        }
                        _ => self.parse_value(),
                    }
                } else {
                    String::new()
                };
                if !self.eat(']') {
                    bail!(self.error("expected ']'"));
                }
                element = element.with_attr(name, value);
            } else {
                break;
            }
        }

        if tag.is_empty() && classes.is_empty() && element.attrs.is_empty() {
            bail!(self.error("expected an element or a quoted text node"));
        }
        if !classes.is_empty() {
            element = element.with_attr("class", classes.join(" "));
        }
        Ok(element)
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_alphanumeric() || matches!(c, '-' | '_' | ':'))
        {
            name.push(c);
        }
        name
    }

    fn parse_required_name(&mut self, what: &str) -> Result<String> {
        let name = self.parse_name();
        if name.is_empty() {
            bail!(self.error(&format!("expected {what}")));
        }
        Ok(name)
    }

    /// An unquoted attribute value runs up to the closing `]`.
    fn parse_value(&mut self) -> String {
        let mut value = String::new();
        while let Some((_, c)) = self.chars.next_if(|&(_, c)| c != ']') {
            value.push(c);
        }
        value
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(text),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => break,
                },
                Some((_, c)) => text.push(c),
                None => break,
            }
        }
        bail!(self.error("unterminated string"))
    }
}
