//! Whitespace before a leaf.
//!
//! The prefix of every leaf appended to a line is recomputed from the
//! leaf's kind, its parent's kind and what precedes it in the tree. The
//! source spacing is never consulted.

use vy_ir::{Leaf, NodeKind, TokenKind, Tree};

const NO: &str = "";
const SPACE: &str = " ";
const DOUBLESPACE: &str = "  ";

/// Leaves that never have whitespace before them.
fn always_no_space(kind: TokenKind) -> bool {
    kind.is_closing_bracket()
        || matches!(
            kind,
            TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::StandaloneComment
                | TokenKind::Docstring
        )
}

/// Whitespace to put before `leaf` when it is not the first leaf on its line.
pub fn whitespace(tree: &Tree, leaf: &Leaf) -> &'static str {
    let kind = leaf.kind;
    if always_no_space(kind) {
        return NO;
    }
    if kind == TokenKind::Comment {
        return DOUBLESPACE;
    }

    let Some(parent) = tree.parent(leaf.id) else {
        return SPACE;
    };
    let Some(parent_kind) = tree.node_kind(parent) else {
        return SPACE;
    };
    if parent_kind == NodeKind::Decorator {
        return NO;
    }

    match tree.prev_sibling(leaf.id) {
        None => {
            let Some(prevp) = tree.preceding_leaf(parent).and_then(|id| tree.leaf(id)) else {
                return NO;
            };
            if prevp.kind.is_opening_bracket() || prevp.kind == TokenKind::Tilde {
                return NO;
            }
            let prevp_parent = tree.parent_kind(prevp.id);
            if prevp.kind == TokenKind::Equal && prevp_parent == Some(NodeKind::Kwarg) {
                return NO;
            }
            if prevp_parent == Some(NodeKind::Unary) && tree.prev_sibling(prevp.id).is_none() {
                return NO;
            }
        }
        Some(prev) => {
            let prev_kind = tree.token_kind(prev);
            if parent_kind == NodeKind::Kwarg {
                if prev_kind != Some(TokenKind::Comma) {
                    return NO;
                }
            } else if prev_kind.is_some_and(TokenKind::is_opening_bracket) {
                return NO;
            } else if parent_kind == NodeKind::Import {
                let prev_is_from = tree.leaf(prev).is_some_and(|l| l.is_keyword("from"));
                if (kind == TokenKind::Dot && !prev_is_from)
                    || (prev_kind == Some(TokenKind::Dot) && !leaf.is_keyword("import"))
                {
                    return NO;
                }
            } else if parent_kind == NodeKind::Attribute {
                if kind == TokenKind::Dot || prev_kind == Some(TokenKind::Dot) {
                    return NO;
                }
            } else if parent_kind.hugs_brackets() {
                if matches!(kind, TokenKind::LPar | TokenKind::LSqb)
                    && prev_kind != Some(TokenKind::Arrow)
                {
                    return NO;
                }
            } else if parent_kind == NodeKind::Unary {
                return NO;
            }
        }
    }

    SPACE
}

#[cfg(test)]
mod tests;
