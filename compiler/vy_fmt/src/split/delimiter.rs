//! Same-depth splits.
//!
//! Unlike the bracket splits these keep the depth of the line: they only
//! fan its content out over several lines.

use std::mem;

use vy_ir::{Leaf, TokenKind, Tree};

use super::{CannotSplit, SplitResult};
use crate::brackets::{BracketMatchError, COMMA_PRIORITY, DOT_PRIORITY};
use crate::line::Line;

/// Collects the output lines of a same-depth split.
struct FanOut<'a> {
    tree: &'a Tree,
    original: &'a Line,
    lines: Vec<Line>,
    current: Line,
}

impl<'a> FanOut<'a> {
    fn new(tree: &'a Tree, original: &'a Line) -> Self {
        FanOut {
            tree,
            original,
            lines: Vec::new(),
            current: Line::new(original.depth, original.inside_brackets),
        }
    }

    /// Append to the current line, or start a new one when a standalone
    /// comment cannot share it.
    fn append(&mut self, leaf: Leaf) -> Result<(), BracketMatchError> {
        if self.current.accepts(&leaf) {
            return self.current.append(self.tree, leaf, true);
        }
        self.flush();
        self.current.append(self.tree, leaf, false)
    }

    /// Append `leaf` and its trailing comments.
    fn append_with_comments(&mut self, leaf: &Leaf) -> Result<(), BracketMatchError> {
        self.append(leaf.clone())?;
        for comment in self.original.comments_after(leaf.id) {
            self.append(comment.clone())?;
        }
        Ok(())
    }

    fn flush(&mut self) {
        let fresh = Line::new(self.original.depth, self.original.inside_brackets);
        let full = mem::replace(&mut self.current, fresh);
        self.lines.push(full);
    }

    /// The produced lines, none of them starting with whitespace.
    fn finish(mut self) -> Vec<Line> {
        if !self.current.is_empty() {
            self.flush();
        }
        for line in &mut self.lines {
            if let Some(first) = line.leaves.first_mut() {
                first.prefix.clear();
            }
        }
        self.lines
    }
}

/// Split at every delimiter of the highest priority on the line.
///
/// A comma split makes sure the last element has a trailing comma too.
pub(super) fn delimiter_split(tree: &Tree, line: &Line) -> SplitResult {
    let Some(last) = line.leaves.last() else {
        return Err(CannotSplit::NotApplicable("line empty"));
    };
    let tracker = &line.bracket_tracker;
    let Some(priority) = tracker.max_delimiter_priority(&[last.id]) else {
        return Err(CannotSplit::NotApplicable("no delimiters found"));
    };
    if priority == DOT_PRIORITY && tracker.delimiter_count_with_priority(priority) == 1 {
        return Err(CannotSplit::NotApplicable(
            "splitting a single attribute from its owner looks wrong",
        ));
    }

    let mut fan_out = FanOut::new(tree, line);
    for leaf in &line.leaves {
        fan_out.append_with_comments(leaf)?;
        if tracker.delimiter(leaf.id) == Some(priority) {
            fan_out.flush();
        }
    }

    let needs_comma = priority == COMMA_PRIORITY
        && fan_out.current.leaves.last().is_some_and(|leaf| {
            !matches!(leaf.kind, TokenKind::Comma | TokenKind::StandaloneComment)
        });
    if needs_comma {
        fan_out
            .current
            .append(tree, Leaf::synthetic(TokenKind::Comma, ","), false)?;
    }
    Ok(fan_out.finish())
}

/// Give every standalone comment inside the line a line of its own.
pub(super) fn standalone_comment_split(tree: &Tree, line: &Line) -> SplitResult {
    if !line.contains_standalone_comments(usize::MAX) {
        return Err(CannotSplit::NotApplicable("line has no standalone comments"));
    }
    let mut fan_out = FanOut::new(tree, line);
    for leaf in &line.leaves {
        fan_out.append_with_comments(leaf)?;
    }
    Ok(fan_out.finish())
}
