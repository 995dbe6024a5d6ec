//! Trailers the right-hand split may skip.

use vy_ir::{ElementId, Leaf, TokenKind, Tree};

use crate::config::INDENT_WIDTH;
use crate::line::{is_one_sequence_between, str_width, Line};

/// Sets of closing bracket ids for the right-hand split to omit, growing
/// from the end of the line.
///
/// A trailer can be omitted when everything from it to the end of the line
/// fits. Each set includes the previous one. The first set is empty unless
/// the line has a magic trailing comma, in which case it has to explode
/// where that comma is.
pub(super) fn generate_trailers_to_omit(
    tree: &Tree,
    line: &Line,
    max_width: usize,
) -> Vec<Vec<ElementId>> {
    let mut sets = Vec::new();
    let mut omit: Vec<ElementId> = Vec::new();
    if line.magic_trailing_comma.is_none() {
        sets.push(omit.clone());
    }

    let mut length = INDENT_WIDTH * line.depth;
    let mut opening: Option<ElementId> = None;
    let mut closing: Option<ElementId> = None;
    let mut inner: Vec<ElementId> = Vec::new();
    for (index, leaf, leaf_length) in line.leaf_lengths().rev() {
        length += leaf_length;
        if length > max_width {
            break;
        }
        let has_inline_comment = leaf_length > str_width(&leaf.value) + str_width(&leaf.prefix);
        if leaf.kind == TokenKind::StandaloneComment || has_inline_comment {
            break;
        }

        let previous = index.checked_sub(1).map(|i| &line.leaves[i]);
        if opening.is_some() {
            if Some(leaf.id) == opening {
                opening = None;
            } else if leaf.kind.is_closing_bracket() {
                if ends_with_magic_comma(tree, line, leaf, previous) {
                    break;
                }
                inner.push(leaf.id);
            }
        } else if leaf.kind.is_closing_bracket() {
            if previous.is_some_and(|prev| prev.kind.is_opening_bracket()) {
                // Empty brackets never split well; only omit them along
                // with a real trailer.
                inner.push(leaf.id);
                continue;
            }
            if let Some(closing) = closing {
                omit.push(closing);
                omit.append(&mut inner);
                sets.push(omit.clone());
            }
            if ends_with_magic_comma(tree, line, leaf, previous) {
                break;
            }
            if !leaf.value.is_empty() {
                opening = leaf.opening_bracket;
                closing = Some(leaf.id);
            }
        }
    }
    sets
}

/// Bracket pairs with a trailing comma are never omitted; they explode.
fn ends_with_magic_comma(
    tree: &Tree,
    line: &Line,
    closing: &Leaf,
    previous: Option<&Leaf>,
) -> bool {
    previous.is_some_and(|prev| prev.kind == TokenKind::Comma)
        && closing
            .opening_bracket
            .is_some_and(|opening| !is_one_sequence_between(tree, opening, closing, &line.leaves))
}
