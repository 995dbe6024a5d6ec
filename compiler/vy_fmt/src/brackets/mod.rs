//! Bracket and delimiter tracking for one line.
//!
//! Every leaf appended to a [`Line`](crate::line::Line) passes through
//! [`BracketTracker::mark`], which records its bracket depth, links closing
//! brackets to their opening partner and remembers the leaves a line may be
//! split at (delimiters) together with their priority.

use rustc_hash::FxHashMap;
use tracing::trace;
use vy_ir::{ElementId, Leaf, NodeKind, TokenKind, Tree};

/// Split priority of a delimiter. Higher splits first.
pub type Priority = u8;

pub const COMPREHENSION_PRIORITY: Priority = 20;
pub const COMMA_PRIORITY: Priority = 18;
pub const TERNARY_PRIORITY: Priority = 16;
pub const LOGIC_PRIORITY: Priority = 14;
pub const STRING_PRIORITY: Priority = 12;
pub const COMPARATOR_PRIORITY: Priority = 10;
pub const DOT_PRIORITY: Priority = 1;

/// Priority of a binary math operator, loosest binding first.
pub const fn math_priority(kind: TokenKind) -> Option<Priority> {
    match kind {
        TokenKind::VBar => Some(9),
        TokenKind::Circumflex => Some(8),
        TokenKind::Amper => Some(7),
        TokenKind::LeftShift | TokenKind::RightShift => Some(6),
        TokenKind::Plus | TokenKind::Minus => Some(5),
        TokenKind::Star | TokenKind::Slash | TokenKind::DoubleSlash | TokenKind::Percent => {
            Some(4)
        }
        TokenKind::Tilde => Some(3),
        TokenKind::DoubleStar => Some(2),
        _ => None,
    }
}

/// A closing bracket without a matching opening bracket on the line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unable to match closing bracket {bracket} at {line}:{column} to an opening bracket")]
pub struct BracketMatchError {
    pub bracket: TokenKind,
    pub line: u32,
    pub column: u32,
}

impl BracketMatchError {
    fn at(leaf: &Leaf) -> Self {
        BracketMatchError {
            bracket: leaf.kind,
            line: leaf.line,
            column: leaf.column,
        }
    }
}

/// Keeps track of brackets on a line.
#[derive(Clone, Debug, Default)]
pub struct BracketTracker {
    depth: usize,
    bracket_match: FxHashMap<(usize, TokenKind), ElementId>,
    delimiters: FxHashMap<ElementId, Priority>,
    previous: Option<Leaf>,
    for_loop_depths: Vec<usize>,
    invisible: Vec<ElementId>,
}

impl BracketTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `leaf` with bracket metadata and record it if it is a delimiter.
    ///
    /// Sets `bracket_depth` on every leaf and `opening_bracket` on closing
    /// brackets. Delimiters are only recorded at depth 0, so a line only
    /// knows about split points outside the brackets it opened itself.
    pub fn mark(&mut self, tree: &Tree, leaf: &mut Leaf) -> Result<(), BracketMatchError> {
        if leaf.kind == TokenKind::Comment {
            return Ok(());
        }

        self.maybe_decrement_after_for_loop_variable(leaf);
        if leaf.kind.is_closing_bracket() {
            self.depth = self
                .depth
                .checked_sub(1)
                .ok_or_else(|| BracketMatchError::at(leaf))?;
            let opening = self
                .bracket_match
                .remove(&(self.depth, leaf.kind))
                .ok_or_else(|| BracketMatchError::at(leaf))?;
            leaf.opening_bracket = Some(opening);
            if leaf.value.is_empty() {
                self.invisible.push(leaf.id);
            }
        }
        leaf.bracket_depth = self.depth;

        if self.depth == 0 {
            match (
                is_split_before_delimiter(tree, leaf, self.previous.as_ref()),
                &self.previous,
            ) {
                (Some(priority), Some(previous)) => {
                    trace!(value = %previous.value, priority, "delimiter before");
                    self.delimiters.insert(previous.id, priority);
                }
                _ => {
                    if let Some(priority) = is_split_after_delimiter(leaf) {
                        trace!(value = %leaf.value, priority, "delimiter after");
                        self.delimiters.insert(leaf.id, priority);
                    }
                }
            }
        }

        if let Some(closing) = leaf.kind.closing_bracket() {
            self.bracket_match.insert((self.depth, closing), leaf.id);
            self.depth += 1;
            if leaf.value.is_empty() {
                self.invisible.push(leaf.id);
            }
        }
        self.previous = Some(leaf.clone());
        self.maybe_increment_for_loop_variable(leaf);
        Ok(())
    }

    /// Current bracket depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True if an opening bracket on the line is still unmatched.
    #[inline]
    pub fn any_open_brackets(&self) -> bool {
        !self.bracket_match.is_empty()
    }

    #[inline]
    pub fn has_delimiters(&self) -> bool {
        !self.delimiters.is_empty()
    }

    /// Priority recorded for the leaf with `id`, if it is a delimiter.
    #[inline]
    pub fn delimiter(&self, id: ElementId) -> Option<Priority> {
        self.delimiters.get(&id).copied()
    }

    /// Highest delimiter priority on the line, ignoring `exclude`.
    pub fn max_delimiter_priority(&self, exclude: &[ElementId]) -> Option<Priority> {
        self.delimiters
            .iter()
            .filter(|(id, _)| !exclude.contains(id))
            .map(|(_, &priority)| priority)
            .max()
    }

    /// Number of delimiters with the given priority.
    pub fn delimiter_count_with_priority(&self, priority: Priority) -> usize {
        self.delimiters.values().filter(|&&p| p == priority).count()
    }

    /// Ids of the invisible brackets marked so far.
    #[inline]
    pub fn invisible(&self) -> &[ElementId] {
        &self.invisible
    }

    /// Commas between `for` and `in` are loop targets, not delimiters, so
    /// the loop variables sit one level deeper.
    fn maybe_increment_for_loop_variable(&mut self, leaf: &Leaf) {
        if leaf.is_keyword("for") {
            self.depth += 1;
            self.for_loop_depths.push(self.depth);
        }
    }

    fn maybe_decrement_after_for_loop_variable(&mut self, leaf: &Leaf) {
        if leaf.is_keyword("in") && self.for_loop_depths.last() == Some(&self.depth) {
            self.depth -= 1;
            self.for_loop_depths.pop();
        }
    }
}

/// Priority of `leaf` as a delimiter that breaks the line after itself.
fn is_split_after_delimiter(leaf: &Leaf) -> Option<Priority> {
    (leaf.kind == TokenKind::Comma).then_some(COMMA_PRIORITY)
}

/// Priority of `leaf` as a delimiter that breaks the line before itself.
fn is_split_before_delimiter(tree: &Tree, leaf: &Leaf, previous: Option<&Leaf>) -> Option<Priority> {
    let parent = tree.parent_kind(leaf.id);

    if leaf.kind == TokenKind::Dot
        && parent.is_some_and(|kind| kind != NodeKind::Import)
        && previous.map_or(true, |prev| prev.kind.is_closing_bracket())
    {
        return Some(DOT_PRIORITY);
    }

    if leaf.kind.is_math_operator() && matches!(parent, Some(NodeKind::BinOp | NodeKind::Power)) {
        return math_priority(leaf.kind);
    }

    if leaf.kind.is_comparator() {
        return Some(COMPARATOR_PRIORITY);
    }

    if parent == Some(NodeKind::Comparison)
        && (leaf.is_keyword("not")
            || (leaf.is_keyword("in") && !previous.is_some_and(|prev| prev.is_keyword("not"))))
    {
        return Some(COMPARATOR_PRIORITY);
    }

    if leaf.kind == TokenKind::String && previous.is_some_and(|prev| prev.kind == TokenKind::String)
    {
        return Some(STRING_PRIORITY);
    }

    if leaf.is_keyword("for")
        && parent == Some(NodeKind::ForStmt)
        && !tree
            .prev_sibling(leaf.id)
            .is_some_and(|sibling| tree.is_leaf(sibling))
    {
        return Some(COMPREHENSION_PRIORITY);
    }

    if leaf.is_keyword("if") && matches!(parent, Some(NodeKind::IfStmt | NodeKind::CondExec)) {
        return Some(COMPREHENSION_PRIORITY);
    }

    if (leaf.is_keyword("if") || leaf.is_keyword("else")) && parent == Some(NodeKind::Ternary) {
        return Some(TERNARY_PRIORITY);
    }

    if (leaf.is_keyword("and") || leaf.is_keyword("or")) && parent.is_some() {
        return Some(LOGIC_PRIORITY);
    }

    None
}
