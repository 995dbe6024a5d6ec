//! Optional parentheses.
//!
//! Right-hand sides, return values, assert operands and if conditions get
//! a pair of invisible parentheses. The splitter makes them visible only
//! when it has to break the line there.

use vy_ir::{ElementId, Leaf, NodeKind, TokenKind, Tree};
use vy_stack::ensure_sufficient_stack;

/// Wrap every node child of `node` that follows a leaf accepted by
/// `parens_after` in invisible parentheses. The tuple target of a multiple
/// assignment is wrapped too.
///
/// For an `if`/`elif` clause the condition is wrapped unless it already is
/// a parenthesized atom, whose parentheses become invisible instead.
pub(crate) fn normalize_invisible_parens(
    tree: &mut Tree,
    node: ElementId,
    parens_after: fn(&Leaf) -> bool,
) {
    let children = tree.children(node).to_vec();
    let mut check_lpar = false;
    for (index, child) in children.into_iter().enumerate() {
        if index == 0 && tree.node_kind(child) == Some(NodeKind::ExprList) {
            check_lpar = true;
        }

        if check_lpar {
            if tree.node_kind(child) == Some(NodeKind::CondExec) {
                if let Some(&condition) = tree.children(child).first() {
                    if !tree.is_leaf(condition) && maybe_make_parens_invisible_in_atom(tree, condition)
                    {
                        tree.wrap_in_parentheses(condition, false);
                    }
                }
            } else if !tree.is_leaf(child) {
                tree.wrap_in_parentheses(child, false);
            }
        }

        check_lpar = tree.leaf(child).is_some_and(parens_after);
    }
}

/// Make the parentheses of atom `node` invisible if that is safe, and drop
/// redundant nested invisible pairs. Tuples keep their parentheses.
///
/// Returns whether `node` still needs to be wrapped in invisible
/// parentheses.
pub(crate) fn maybe_make_parens_invisible_in_atom(tree: &mut Tree, node: ElementId) -> bool {
    if tree.node_kind(node) != Some(NodeKind::Atom) {
        return true;
    }
    let &[first, middle, last] = tree.children(node) else {
        return true;
    };
    let is = |id: ElementId, kind: TokenKind, value: &str| {
        tree.leaf(id).is_some_and(|leaf| leaf.kind == kind && leaf.value == value)
    };
    if !is(first, TokenKind::LPar, "(") || !is(last, TokenKind::RPar, ")") {
        return true;
    }
    if tree.node_kind(middle) == Some(NodeKind::ExprList) {
        return false;
    }

    for bracket in [first, last] {
        if let Some(leaf) = tree.leaf_mut(bracket) {
            leaf.value.clear();
        }
    }
    ensure_sufficient_stack(|| maybe_make_parens_invisible_in_atom(tree, middle));

    if is_atom_with_invisible_parens(tree, middle) {
        if let Some(&inner) = tree.children(middle).get(1) {
            tree.replace(middle, inner);
        }
    }
    false
}

fn is_atom_with_invisible_parens(tree: &Tree, node: ElementId) -> bool {
    if tree.node_kind(node) != Some(NodeKind::Atom) {
        return false;
    }
    let children = tree.children(node);
    let invisible = |id: Option<&ElementId>, kind: TokenKind| {
        id.and_then(|&id| tree.leaf(id))
            .is_some_and(|leaf| leaf.kind == kind && leaf.value.is_empty())
    };
    invisible(children.first(), TokenKind::LPar) && invisible(children.last(), TokenKind::RPar)
}
