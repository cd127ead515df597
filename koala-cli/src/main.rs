//! Koala CLI
//!
//! Inspect how declarations expand into longhand slots, how keyframe keys
//! normalize, and which elements a selector matches in a small tree.

mod tree_spec;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use koala_common::warning::warning_count;
use koala_css::{CssRule, DeclarationBlock, PropertySlot, parse_selector_list};
use koala_dom::{DomTree, NodeId, NodeType};
use owo_colors::OwoColorize;

/// Koala: inspect CSS declaration handling and element queries
#[derive(Parser, Debug)]
#[command(name = "koala")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show how a shorthand distributes to its longhands
    koala expand "text-decoration: red underline; color: blue"

    # The same block as JSON
    koala expand --json "outline: 2px dashed"

    # Normalize a keyframe key
    koala keyframe "from, 50%, to" --body "color: red"

    # Run a selector against a tree
    koala query "div > .cls" --tree "div > (span.cls, a)"

    # Print the tree with matches highlighted
    koala query "a[href]" --print-tree --tree "nav > (a[href=/], span > a)"
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a declaration list and show every property slot
    Expand {
        /// Declarations, e.g. "text-decoration: underline red"
        declarations: String,

        /// Print the block as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a keyframe key and print the resulting rule
    Keyframe {
        /// Keyframe key, e.g. "from" or "25%, 75%"
        key: String,

        /// Declarations for the keyframe body
        #[arg(long, default_value = "")]
        body: String,
    },

    /// Run a selector against a tree and list the matching elements
    Query {
        /// Selector list, e.g. "ul > li.item, h1"
        selector: String,

        /// Tree description, e.g. "div > (span.cls, a)"
        #[arg(long, value_name = "SPEC")]
        tree: String,

        /// Stop at the first match
        #[arg(long)]
        first: bool,

        /// Print the whole tree, marking matches
        #[arg(long)]
        print_tree: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Expand { declarations, json } => expand(&declarations, json),
        Command::Keyframe { key, body } => keyframe(&key, &body),
        Command::Query {
            selector,
            tree,
            first,
            print_tree,
        } => query(&selector, &tree, first, print_tree),
    }
}

fn expand(declarations: &str, json: bool) -> Result<()> {
    let block = DeclarationBlock::parse(declarations);

    if json {
        let text = serde_json::to_string_pretty(&block).context("serializing declaration block")?;
        println!("{text}");
        return Ok(());
    }

    for slot in &block {
        match slot {
            PropertySlot::Shorthand(shorthand) => {
                let value = shorthand.serialize(&block);
                println!("{}: {} {}", shorthand.name().bold(), value, "(shorthand)".dimmed());
            }
            PropertySlot::Longhand(property) if property.has_value() => {
                println!("{}: {}", property.name(), property.serialize().green());
            }
            PropertySlot::Longhand(property) => {
                println!("{}: {}", property.name(), "unset".dimmed());
            }
        }
    }

    println!();
    println!("{}", block.to_css());
    report_warnings();
    Ok(())
}

fn keyframe(key: &str, body: &str) -> Result<()> {
    let rule = CssRule::keyframe_rule(key, body)
        .with_context(|| format!("invalid keyframe key '{key}'"))?;
    println!("{}", rule.to_css());
    report_warnings();
    Ok(())
}

fn query(selector: &str, spec: &str, first: bool, print_tree: bool) -> Result<()> {
    let selectors =
        parse_selector_list(selector).with_context(|| format!("invalid selector '{selector}'"))?;
    let tree = tree_spec::build_tree(spec)?;

    let matches: Vec<NodeId> = if first {
        tree.query_selector(NodeId::ROOT, &selectors)
            .into_iter()
            .collect()
    } else {
        tree.query_selector_all(NodeId::ROOT, &selectors)
    };

    if print_tree {
        print_node(&tree, tree.root(), 0, &matches);
    } else {
        for &id in &matches {
            println!("{}", describe(&tree, id));
        }
    }
    eprintln!("{} match(es) for {}", matches.len(), selectors.to_string().cyan());
    Ok(())
}

fn report_warnings() {
    let count = warning_count();
    if count > 0 {
        eprintln!("{}", format!("{count} declaration(s) dropped").yellow());
    }
}

/// `<tag attr="value">`, attributes sorted by name.
fn describe(tree: &DomTree, id: NodeId) -> String {
    let Some(element) = tree.as_element(id) else {
        return String::new();
    };
    let mut attrs: Vec<(&String, &String)> = element.attrs.iter().collect();
    attrs.sort();
    let mut text = format!("<{}", element.tag_name);
    for (name, value) in attrs {
        if value.is_empty() {
            text.push_str(&format!(" {name}"));
        } else {
            text.push_str(&format!(" {name}=\"{value}\""));
        }
    }
    text.push('>');
    text
}

fn print_node(tree: &DomTree, id: NodeId, indent: usize, matches: &[NodeId]) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => println!("{prefix}Document"),
        NodeType::Element(_) if matches.contains(&id) => {
            println!("{prefix}{} {}", describe(tree, id).green().bold(), "*".green());
        }
        NodeType::Element(_) => println!("{prefix}{}", describe(tree, id)),
        NodeType::Text(text) => println!("{prefix}\"{}\"", text.replace('\n', "\\n")),
        NodeType::Comment(text) => println!("{prefix}<!-- {text} -->"),
    }
    for &child in tree.children(id) {
        print_node(tree, child, indent + 1, matches);
    }
}
