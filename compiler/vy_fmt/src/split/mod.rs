//! Splitting logical lines into physical lines.
//!
//! [`split_line`] takes one logical line and returns the physical lines it
//! renders as. A line that fits is returned as is. Otherwise the
//! strategies that suit the shape of the line are tried in order, and the
//! lines produced by the first one that succeeds are split again
//! recursively:
//!
//! - declaration headers: left-hand split on the first bracket pair
//! - bracket contents: delimiter split, then standalone comment split,
//!   then right-hand split
//! - everything else: right-hand split on the last bracket pair
//!
//! Spacing around `**` is normalized last. When no strategy applies, the
//! line is returned unchanged and may stay too long.
//!
//! Splitting never mutates the tree. Invisible parentheses that a split
//! needs become visible only in the lines it produces.

mod delimiter;
mod omit;
mod rhs;

use thiserror::Error;
use tracing::{debug, trace};
use vy_ir::{ElementId, Leaf, NodeKind, TokenKind, Tree};
use vy_stack::ensure_sufficient_stack;

use crate::brackets::BracketMatchError;
use crate::line::{is_line_short_enough, is_rendered_short_enough, Line};

/// A strategy did not apply to a line. The splitter moves on to the next
/// one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CannotSplit {
    #[error("{0}")]
    NotApplicable(&'static str),
    #[error("line transformer returned an unchanged result")]
    Unchanged,
    #[error(transparent)]
    BracketMatch(#[from] BracketMatchError),
}

type SplitResult = Result<Vec<Line>, CannotSplit>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Transform {
    LeftHand,
    RightHand,
    Delimiter,
    StandaloneComments,
    HugPowerOp,
}

impl Transform {
    fn name(self) -> &'static str {
        match self {
            Transform::LeftHand => "left_hand_split",
            Transform::RightHand => "right_hand_split",
            Transform::Delimiter => "delimiter_split",
            Transform::StandaloneComments => "standalone_comment_split",
            Transform::HugPowerOp => "hug_power_op",
        }
    }
}

/// Split `line` so that it fits in `max_width` if possible.
///
/// With `force_optional_parentheses`, the right-hand split never tries to
/// omit invisible parentheses; it splits on them right away.
pub fn split_line(
    tree: &Tree,
    line: Line,
    max_width: usize,
    force_optional_parentheses: bool,
) -> Vec<Line> {
    Splitter { tree, max_width }.split(line, force_optional_parentheses)
}

/// Shared context of one split.
struct Splitter<'t> {
    tree: &'t Tree,
    max_width: usize,
}

impl Splitter<'_> {
    fn split(&self, line: Line, force: bool) -> Vec<Line> {
        if line.is_comment() {
            return vec![line];
        }

        let rendered = line.render();
        let transforms: &[Transform] = if !line.should_split_rhs
            && line.magic_trailing_comma.is_none()
            && is_rendered_short_enough(&line, &rendered, self.max_width)
        {
            &[Transform::HugPowerOp]
        } else if line.is_def(self.tree) {
            &[Transform::LeftHand, Transform::HugPowerOp]
        } else if line.inside_brackets {
            &[
                Transform::Delimiter,
                Transform::StandaloneComments,
                Transform::RightHand,
                Transform::HugPowerOp,
            ]
        } else {
            &[Transform::RightHand, Transform::HugPowerOp]
        };

        for &transform in transforms {
            match self.run_transformer(&line, transform, &rendered, force) {
                Ok(lines) => {
                    debug!(transform = transform.name(), lines = lines.len(), "split");
                    return lines;
                }
                Err(err) => trace!(transform = transform.name(), %err, "rejected"),
            }
        }
        vec![line]
    }

    fn apply(&self, transform: Transform, line: &Line, force: bool) -> SplitResult {
        match transform {
            Transform::LeftHand => self.left_hand_split(line),
            Transform::RightHand => self.rhs(line, force),
            Transform::Delimiter => delimiter::delimiter_split(self.tree, line),
            Transform::StandaloneComments => delimiter::standalone_comment_split(self.tree, line),
            Transform::HugPowerOp => hug_power_op(self.tree, line),
        }
    }

    fn run_transformer(
        &self,
        line: &Line,
        transform: Transform,
        rendered: &str,
        force: bool,
    ) -> SplitResult {
        let mut result = Vec::new();
        for transformed in self.apply(transform, line, force)? {
            if transformed.render() == rendered {
                return Err(CannotSplit::Unchanged);
            }
            result.extend(ensure_sufficient_stack(|| self.split(transformed, force)));
        }

        if transform != Transform::RightHand || !self.wants_second_opinion(line, &result) {
            return Ok(result);
        }

        // Splitting without the optional parentheses left the first line
        // too long. Try again with them made visible.
        let copy = self.rebuild(line)?;
        if let Ok(second_opinion) = self.run_transformer(&copy, transform, rendered, true) {
            if second_opinion
                .iter()
                .all(|line| is_line_short_enough(line, self.max_width))
            {
                debug!("second opinion with visible parentheses");
                return Ok(second_opinion);
            }
        }
        Ok(result)
    }

    fn wants_second_opinion(&self, line: &Line, result: &[Line]) -> bool {
        let invisible = line.bracket_tracker.invisible();
        if invisible.is_empty() || line.leaves.iter().any(|leaf| leaf.id.is_synthetic()) {
            return false;
        }
        let all_still_invisible = result
            .iter()
            .flat_map(|line| &line.leaves)
            .all(|leaf| leaf.value.is_empty() || !invisible.contains(&leaf.id));
        all_still_invisible
            && result
                .first()
                .is_some_and(|first| !is_line_short_enough(first, self.max_width))
    }

    /// A fresh copy of `line`, with whitespace and bracket data recomputed.
    fn rebuild(&self, line: &Line) -> Result<Line, CannotSplit> {
        let mut copy = line.clone_empty();
        for leaf in &line.leaves {
            let fresh = Leaf {
                prefix: String::new(),
                bracket_depth: 0,
                opening_bracket: None,
                ..leaf.clone()
            };
            copy.append(self.tree, fresh, false)?;
            for comment in line.comments_after(leaf.id) {
                copy.append(self.tree, comment.clone(), true)?;
            }
        }
        Ok(copy)
    }

    /// Right-hand split, omitting as many trailers as needed for the first
    /// line to fit.
    fn rhs(&self, line: &Line, force: bool) -> SplitResult {
        for omit in omit::generate_trailers_to_omit(self.tree, line, self.max_width) {
            let lines = self.right_hand_split(line, &omit, force)?;
            if lines
                .first()
                .is_some_and(|first| is_line_short_enough(first, self.max_width))
            {
                return Ok(lines);
            }
        }
        // Best effort: multiline strings and exploding trailing commas end
        // up here.
        self.right_hand_split(line, &[], force)
    }
}

/// Remove the spaces around `**`.
fn hug_power_op(tree: &Tree, line: &Line) -> SplitResult {
    if !line.leaves.iter().any(|leaf| leaf.kind == TokenKind::DoubleStar) {
        return Err(CannotSplit::NotApplicable("no power operator in the line"));
    }

    let last = line.leaves.len() - 1;
    let mut hugged = line.clone_empty();
    let mut hug_next = false;
    for (index, leaf) in line.leaves.iter().enumerate() {
        let mut new_leaf = leaf.clone();
        if hug_next {
            new_leaf.prefix.clear();
        }
        hug_next = 0 < index
            && index < last
            && leaf.kind == TokenKind::DoubleStar
            && !in_augmented_assignment(tree, leaf.id);
        if hug_next {
            new_leaf.prefix.clear();
        }
        hugged.append(tree, new_leaf, true)?;
        for comment in line.comments_after(leaf.id) {
            hugged.append(tree, comment.clone(), true)?;
        }
    }
    Ok(vec![hugged])
}

fn in_augmented_assignment(tree: &Tree, id: ElementId) -> bool {
    tree.parent(id)
        .and_then(|parent| tree.parent_kind(parent))
        == Some(NodeKind::AugAssign)
}
