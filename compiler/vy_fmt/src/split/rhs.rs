//! Bracket splits.
//!
//! Both split a line into `head`, `body` and `tail` around one bracket
//! pair: the head ends with the opening bracket, the body is the content
//! of the pair one level deeper, and the tail starts with the closing
//! bracket.

use vy_ir::{ElementId, Leaf, NodeKind, TokenKind, Tree};
use vy_stack::ensure_sufficient_stack;

use super::{CannotSplit, SplitResult, Splitter};
use crate::brackets::{COMMA_PRIORITY, DOT_PRIORITY};
use crate::config::INDENT_WIDTH;
use crate::line::{is_line_short_enough, Line};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Part {
    Head,
    Body,
    Tail,
}

struct Parts {
    head: Vec<Leaf>,
    body: Vec<Leaf>,
    tail: Vec<Leaf>,
}

impl Parts {
    fn new() -> Self {
        Parts {
            head: Vec::new(),
            body: Vec::new(),
            tail: Vec::new(),
        }
    }

    fn get_mut(&mut self, part: Part) -> &mut Vec<Leaf> {
        match part {
            Part::Head => &mut self.head,
            Part::Body => &mut self.body,
            Part::Tail => &mut self.tail,
        }
    }
}

impl Splitter<'_> {
    /// Split on the first opening bracket and its partner. Used for
    /// declaration headers only; elsewhere it tends to look odd.
    pub(super) fn left_hand_split(&self, line: &Line) -> SplitResult {
        let mut parts = Parts::new();
        let mut current = Part::Head;
        let mut matching: Option<ElementId> = None;
        for leaf in &line.leaves {
            let mut leaf = leaf.clone();
            if current == Part::Body
                && matching.is_some()
                && leaf.kind.is_closing_bracket()
                && leaf.opening_bracket == matching
            {
                ensure_visible(&mut leaf);
                if let Some(opening) = parts.head.last_mut() {
                    ensure_visible(opening);
                }
                current = if parts.body.is_empty() {
                    Part::Head
                } else {
                    Part::Tail
                };
            }
            let is_opening = leaf.kind.is_opening_bracket();
            let id = leaf.id;
            parts.get_mut(current).push(leaf);
            if current == Part::Head && is_opening {
                matching = Some(id);
                current = Part::Body;
            }
        }
        let Some(matching) = matching else {
            return Err(CannotSplit::NotApplicable("no brackets found"));
        };
        let Some(opening) = find_leaf(&parts.head, matching).cloned() else {
            return Err(CannotSplit::NotApplicable("no brackets found"));
        };

        let head = self.build_line(parts.head, line, &opening, false)?;
        let body = self.build_line(parts.body, line, &opening, true)?;
        let tail = self.build_line(parts.tail, line, &opening, false)?;
        bracket_split_succeeded(&body, &tail)?;
        Ok(non_empty([head, body, tail]))
    }

    /// Split on the last closing bracket not in `omit` and its partner.
    ///
    /// When that pair is invisible parentheses and leaving them out still
    /// gives a workable shape, the split is retried on the pair before
    /// them instead.
    pub(super) fn right_hand_split(
        &self,
        line: &Line,
        omit: &[ElementId],
        force: bool,
    ) -> SplitResult {
        let mut parts = Parts::new();
        let mut current = Part::Tail;
        let mut opening: Option<ElementId> = None;
        let mut closing: Option<&Leaf> = None;
        for leaf in line.leaves.iter().rev() {
            if current == Part::Body && Some(leaf.id) == opening {
                current = if parts.body.is_empty() {
                    Part::Tail
                } else {
                    Part::Head
                };
            }
            parts.get_mut(current).push(leaf.clone());
            if current == Part::Tail
                && leaf.kind.is_closing_bracket()
                && !omit.contains(&leaf.id)
            {
                opening = leaf.opening_bracket;
                closing = Some(leaf);
                current = Part::Body;
            }
        }
        let (Some(opening_id), Some(closing)) = (opening, closing) else {
            return Err(CannotSplit::NotApplicable("no brackets found"));
        };
        if parts.head.is_empty() {
            return Err(CannotSplit::NotApplicable("no brackets found"));
        }
        parts.head.reverse();
        parts.body.reverse();
        parts.tail.reverse();
        let Some(opening) = find_leaf(&parts.head, opening_id).cloned() else {
            return Err(CannotSplit::NotApplicable("opening bracket is not on the line"));
        };

        let mut head = self.build_line(parts.head, line, &opening, false)?;
        let body = self.build_line(parts.body, line, &opening, true)?;
        let mut tail = self.build_line(parts.tail, line, &opening, false)?;
        bracket_split_succeeded(&body, &tail)?;

        if !force
            && opening.kind == TokenKind::LPar
            && opening.value.is_empty()
            && closing.kind == TokenKind::RPar
            && closing.value.is_empty()
            && !line.is_import(self.tree)
            && !body.contains_standalone_comments(0)
            && can_omit_invisible_parens(&body, self.max_width)
        {
            let mut omit = omit.to_vec();
            omit.push(closing.id);
            match ensure_sufficient_stack(|| self.right_hand_split(line, &omit, force)) {
                Ok(lines) => return Ok(lines),
                Err(_) if !is_line_short_enough(&body, self.max_width) => {
                    return Err(CannotSplit::NotApplicable(
                        "splitting failed, body is still too long and can't be split",
                    ));
                }
                Err(_) => {}
            }
        }

        if let Some(opening) = head.leaves.last_mut() {
            ensure_visible(opening);
        }
        if let Some(closing) = tail.leaves.first_mut() {
            ensure_visible(closing);
        }
        Ok(non_empty([head, body, tail]))
    }

    /// A line with `leaves` and the comments `original` has for them.
    ///
    /// The body goes one level deeper and is marked as bracket content. The
    /// body of an import or of a single parameter list gets a trailing
    /// comma.
    fn build_line(
        &self,
        mut leaves: Vec<Leaf>,
        original: &Line,
        opening: &Leaf,
        is_body: bool,
    ) -> Result<Line, CannotSplit> {
        let mut result = Line::new(original.depth, false);
        if is_body {
            result.inside_brackets = true;
            result.depth += 1;
            if let Some(first) = leaves.first_mut() {
                first.prefix.clear();
            }
            if let Some(first) = leaves.first() {
                let no_commas = original.is_def(self.tree)
                    && opening.value == "("
                    && !leaves.iter().any(|leaf| leaf.kind == TokenKind::Comma)
                    && !in_return_annotation(self.tree, first);
                if original.is_import(self.tree) || no_commas {
                    add_trailing_comma(&mut leaves);
                }
            }
        }

        for leaf in leaves {
            let comments = original.comments_after(leaf.id).to_vec();
            result.append(self.tree, leaf, true)?;
            for comment in comments {
                result.append(self.tree, comment, true)?;
            }
        }
        if is_body && should_split_line(self.tree, &result, opening) {
            result.should_split_rhs = true;
        }
        Ok(result)
    }
}

fn find_leaf(leaves: &[Leaf], id: ElementId) -> Option<&Leaf> {
    leaves.iter().find(|leaf| leaf.id == id)
}

fn non_empty(lines: [Line; 3]) -> Vec<Line> {
    lines.into_iter().filter(|line| !line.is_empty()).collect()
}

/// Give invisible parentheses their characters back.
fn ensure_visible(leaf: &mut Leaf) {
    match leaf.kind {
        TokenKind::LPar => leaf.value = "(".to_owned(),
        TokenKind::RPar => leaf.value = ")".to_owned(),
        _ => {}
    }
}

/// Add a comma after the last leaf that is not a standalone comment,
/// unless it is a comma already.
fn add_trailing_comma(leaves: &mut Vec<Leaf>) {
    let Some(index) = leaves
        .iter()
        .rposition(|leaf| leaf.kind != TokenKind::StandaloneComment)
    else {
        return;
    };
    if leaves[index].kind != TokenKind::Comma {
        leaves.insert(index + 1, Leaf::synthetic(TokenKind::Comma, ","));
    }
}

/// The leaf is part of a parenthesized return type.
fn in_return_annotation(tree: &Tree, leaf: &Leaf) -> bool {
    let parent = tree.parent(leaf.id);
    let grandparent = parent.and_then(|parent| tree.parent(parent));
    [parent, grandparent].into_iter().flatten().any(|node| {
        tree.prev_sibling(node).and_then(|sibling| tree.token_kind(sibling))
            == Some(TokenKind::Arrow)
    })
}

/// The body of a bracket split has to be exploded right away with a
/// delimiter split: it is comma separated and either ends with a trailing
/// comma or is the content of a parenthesized expression.
fn should_split_line(tree: &Tree, line: &Line, opening: &Leaf) -> bool {
    if !opening.kind.is_opening_bracket() {
        return false;
    }
    let Some(last) = line.leaves.last() else {
        return false;
    };
    let trailing_comma = last.kind == TokenKind::Comma;
    let exclude = if trailing_comma { vec![last.id] } else { Vec::new() };
    let Some(max_priority) = line.bracket_tracker.max_delimiter_priority(&exclude) else {
        return false;
    };
    max_priority == COMMA_PRIORITY
        && (trailing_comma || tree.parent_kind(opening.id) == Some(NodeKind::Atom))
}

/// Reject splits that produce the same line, or that move a short tail
/// away from an empty body.
fn bracket_split_succeeded(body: &Line, tail: &Line) -> Result<(), CannotSplit> {
    if !body.is_empty() {
        return Ok(());
    }
    let tail_len = tail.to_string().trim().chars().count();
    if tail_len == 0 {
        return Err(CannotSplit::NotApplicable("splitting brackets produced the same line"));
    }
    if tail_len < 3 {
        return Err(CannotSplit::NotApplicable(
            "splitting brackets on an empty body is not worth it",
        ));
    }
    Ok(())
}

/// Whether `line`, the body of invisible parentheses, reads fine without
/// them. Only answers yes for shapes that do not end up too long.
fn can_omit_invisible_parens(line: &Line, max_width: usize) -> bool {
    let tracker = &line.bracket_tracker;
    let Some(max_priority) = tracker.max_delimiter_priority(&[]) else {
        return true;
    };
    if tracker.delimiter_count_with_priority(max_priority) > 1 {
        return false;
    }
    if max_priority == DOT_PRIORITY {
        return true;
    }

    let [first, second, ..] = line.leaves.as_slice() else {
        return false;
    };
    if first.kind.is_opening_bracket()
        && !second.kind.is_closing_bracket()
        && can_omit_opening_paren(line, first.id, max_width)
    {
        return true;
    }

    let [.., penultimate, last] = line.leaves.as_slice() else {
        return false;
    };
    if matches!(last.kind, TokenKind::RPar | TokenKind::RBrace) {
        if penultimate.kind.is_opening_bracket() {
            return false;
        }
        if can_omit_closing_paren(line, last, max_width) {
            return true;
        }
    }
    false
}

/// The content after the bracket pair opened by `first` fits.
fn can_omit_opening_paren(line: &Line, first: ElementId, max_width: usize) -> bool {
    let mut remainder = false;
    let mut length = INDENT_WIDTH * line.depth;
    for (_, leaf, leaf_length) in line.leaf_lengths() {
        if leaf.kind.is_closing_bracket() && leaf.opening_bracket == Some(first) {
            remainder = true;
        }
        if remainder {
            length += leaf_length;
            if length > max_width {
                return false;
            }
            if leaf.kind.is_opening_bracket() {
                remainder = false;
            }
        }
    }
    true
}

/// The content up to the bracket pair closed by `last` fits, or there are
/// other brackets to split on.
fn can_omit_closing_paren(line: &Line, last: &Leaf, max_width: usize) -> bool {
    let mut length = INDENT_WIDTH * line.depth;
    let mut seen_other_brackets = false;
    for (_, leaf, leaf_length) in line.leaf_lengths() {
        length += leaf_length;
        if Some(leaf.id) == last.opening_bracket {
            if seen_other_brackets || length <= max_width {
                return true;
            }
        } else if leaf.kind.is_opening_bracket() {
            seen_other_brackets = true;
        }
    }
    false
}
