//! Safe-mode check that formatting kept the program's meaning.
//!
//! Both texts are parsed and reduced to a canonical form that drops
//! everything the formatter is allowed to change: comments, docstring text,
//! layout tokens, commas, parentheses and the quoting of string literals.
//! The formatted text is equivalent when both canonical forms are equal.

use std::fmt::Write as _;

use tracing::debug;
use vy_ir::{Element, ElementId, NodeKind, TokenKind, Tree};

use crate::{ParseError, Parser};

/// Parse `original` and `formatted` and compare their canonical forms.
pub fn ast_equivalent(
    parser: &Parser,
    original: &str,
    formatted: &str,
) -> Result<bool, ParseError> {
    let before = canonical_form(&parser.parse(original)?);
    let after = canonical_form(&parser.parse(formatted)?);
    let equal = before == after;
    if !equal {
        debug!(%before, %after, "syntax trees differ");
    }
    Ok(equal)
}

/// Canonical s-expression of a tree, see the module docs.
pub fn canonical_form(tree: &Tree) -> String {
    let mut out = String::new();
    write_element(tree, tree.root(), &mut out);
    out
}

fn is_dropped(kind: TokenKind) -> bool {
    kind.is_comment()
        || kind.is_layout()
        || matches!(kind, TokenKind::Comma | TokenKind::LPar | TokenKind::RPar)
}

/// Children that survive canonicalization.
fn kept_children(tree: &Tree, id: ElementId) -> Vec<ElementId> {
    tree.children(id)
        .iter()
        .copied()
        .filter(|&child| tree.token_kind(child).map_or(true, |kind| !is_dropped(kind)))
        .collect()
}

fn write_element(tree: &Tree, id: ElementId, out: &mut String) {
    match tree.get(id) {
        Some(Element::Leaf(leaf)) => match leaf.kind {
            TokenKind::Docstring => out.push_str("DOCSTRING"),
            TokenKind::String => {
                let _ = write!(out, "STRING:{:?}", string_body(&leaf.value));
            }
            kind => {
                let _ = write!(out, "{kind}:{:?}", leaf.value);
            }
        },
        Some(Element::Node(node)) => {
            let children = kept_children(tree, id);
            // Grouping parentheses and one-element lists vanish.
            if matches!(node.kind, NodeKind::Atom | NodeKind::ExprList) && children.len() == 1 {
                write_element(tree, children[0], out);
                return;
            }
            let _ = write!(out, "({}", node.kind);
            for child in children {
                out.push(' ');
                write_element(tree, child, out);
            }
            out.push(')');
        }
        None => {}
    }
}

/// Prefix and contents of a string literal, independent of its quotes.
fn string_body(literal: &str) -> (String, String) {
    let quote_at = literal.find(['"', '\'']).unwrap_or(0);
    let (prefix, quoted) = literal.split_at(quote_at);
    let quote_len = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
        3
    } else {
        1
    };
    let body = quoted
        .get(quote_len..quoted.len().saturating_sub(quote_len))
        .unwrap_or("");
    let body = body.replace("\\\"", "\"").replace("\\'", "'");
    (prefix.to_lowercase(), body)
}
