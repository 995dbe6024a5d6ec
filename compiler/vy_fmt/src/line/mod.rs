//! Logical lines.
//!
//! A [`Line`] is a flat run of leaves at one indentation depth, with the
//! trailing comments of those leaves kept aside. The line generator fills
//! lines leaf by leaf; the splitter turns one logical line into several
//! physical ones.

use std::fmt;

use vy_ir::{ElementId, Leaf, NodeKind, TokenKind, Tree};

use crate::brackets::{BracketMatchError, BracketTracker};
use crate::config::indent;
use crate::whitespace::whitespace;

/// Keywords that end the flow of a block.
const FLOW_CONTROL: &[&str] = &["return", "break", "continue"];

/// Holds leaves and comments. Renders with `to_string()`.
#[derive(Clone, Debug, Default)]
pub struct Line {
    pub depth: usize,
    pub leaves: Vec<Leaf>,
    /// Trailing comments keyed by the leaf they follow, in leaf order.
    comments: Vec<(ElementId, Vec<Leaf>)>,
    pub bracket_tracker: BracketTracker,
    /// The line is the content of a bracket pair split by the splitter.
    pub inside_brackets: bool,
    /// The body of a bracket split that must be exploded one item per line.
    pub should_split_rhs: bool,
    /// The closing bracket that follows a magic trailing comma.
    pub magic_trailing_comma: Option<ElementId>,
}

impl Line {
    pub fn new(depth: usize, inside_brackets: bool) -> Self {
        Line {
            depth,
            inside_brackets,
            ..Line::default()
        }
    }

    /// An empty line with the same depth and split markers.
    pub fn clone_empty(&self) -> Self {
        Line {
            depth: self.depth,
            inside_brackets: self.inside_brackets,
            should_split_rhs: self.should_split_rhs,
            magic_trailing_comma: self.magic_trailing_comma,
            ..Line::default()
        }
    }

    /// A line with neither leaves nor comments is never emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.comments.is_empty()
    }

    /// Add `leaf` to the end of the line.
    ///
    /// Unless `preformatted` is set, the leaf gets a fresh whitespace prefix
    /// and goes through the bracket tracker. Trailing comments are put
    /// aside and rendered at the end of the line.
    pub fn append(
        &mut self,
        tree: &Tree,
        mut leaf: Leaf,
        preformatted: bool,
    ) -> Result<(), BracketMatchError> {
        let has_value = leaf.kind.is_bracket() || !leaf.value.trim().is_empty();
        if !has_value {
            return Ok(());
        }

        if !self.leaves.is_empty() && !preformatted {
            leaf.prefix.push_str(whitespace(tree, &leaf));
        }
        if self.inside_brackets || !preformatted {
            self.bracket_tracker.mark(tree, &mut leaf)?;
            if self.has_magic_trailing_comma(tree, &leaf) {
                self.magic_trailing_comma = Some(leaf.id);
            }
        }
        if let Some(leaf) = self.append_comment(tree, leaf) {
            self.leaves.push(leaf);
        }
        Ok(())
    }

    /// Whether [`append`](Self::append) keeps the standalone comment
    /// structure valid: nothing goes after a standalone comment, and a
    /// standalone comment only starts a line, unless brackets are open.
    pub fn accepts(&self, leaf: &Leaf) -> bool {
        if self.bracket_tracker.depth() > 0 {
            return true;
        }
        !self.is_comment()
            && !(leaf.kind == TokenKind::StandaloneComment && !self.leaves.is_empty())
    }

    /// Put a trailing comment aside. Returns the leaf back when it has to
    /// be stored as a regular leaf instead.
    fn append_comment(&mut self, tree: &Tree, mut comment: Leaf) -> Option<Leaf> {
        if comment.kind == TokenKind::StandaloneComment
            && self.bracket_tracker.any_open_brackets()
        {
            comment.prefix.clear();
            return Some(comment);
        }
        if comment.kind != TokenKind::Comment {
            return Some(comment);
        }
        let Some(mut last) = self.leaves.last() else {
            comment.kind = TokenKind::StandaloneComment;
            comment.prefix.clear();
            return Some(comment);
        };

        // A comment after invisible parens around a single leaf belongs to
        // that leaf, or it would move on every run.
        if last.kind == TokenKind::RPar
            && last.value.is_empty()
            && tree
                .parent(last.id)
                .is_some_and(|parent| tree.leaves(parent).len() <= 3)
        {
            let Some(before) = self.leaves.len().checked_sub(2).map(|i| &self.leaves[i]) else {
                comment.kind = TokenKind::StandaloneComment;
                comment.prefix.clear();
                return Some(comment);
            };
            last = before;
        }

        let anchor = last.id;
        match self.comments.iter_mut().find(|(id, _)| *id == anchor) {
            Some((_, comments)) => comments.push(comment),
            None => self.comments.push((anchor, vec![comment])),
        }
        None
    }

    /// Comments that go right after the leaf with `id`.
    pub fn comments_after(&self, id: ElementId) -> &[Leaf] {
        self.comments
            .iter()
            .find(|(anchor, _)| *anchor == id)
            .map_or(&[], |(_, comments)| comments.as_slice())
    }

    fn first(&self) -> Option<&Leaf> {
        self.leaves.first()
    }

    /// A lone standalone comment or docstring.
    pub fn is_comment(&self) -> bool {
        self.leaves.len() == 1
            && self.first().is_some_and(|leaf| {
                matches!(
                    leaf.kind,
                    TokenKind::StandaloneComment | TokenKind::Docstring
                )
            })
    }

    pub fn is_decorator(&self) -> bool {
        self.first().is_some_and(|leaf| leaf.kind == TokenKind::At)
    }

    pub fn is_import(&self, tree: &Tree) -> bool {
        self.first().is_some_and(|leaf| is_import(tree, leaf))
    }

    pub fn is_flow_control(&self) -> bool {
        self.first().is_some_and(|leaf| {
            leaf.kind == TokenKind::Keyword && FLOW_CONTROL.contains(&leaf.value.as_str())
        })
    }

    pub fn is_pragma(&self) -> bool {
        self.first().is_some_and(|leaf| leaf.kind == TokenKind::Pragma)
    }

    /// A declaration header: `def`, `struct`, `event`, `enum`, `interface`.
    /// Function signatures inside an interface body do not count.
    pub fn is_def(&self, tree: &Tree) -> bool {
        self.first().is_some_and(|leaf| {
            let in_interface = tree
                .parent(leaf.id)
                .and_then(|parent| tree.parent_kind(parent))
                == Some(NodeKind::InterfaceFunction);
            leaf.kind.is_declaration() && !in_interface
        })
    }

    /// Standalone comments at or above `depth_limit`; such a line has to be
    /// split before it can be emitted.
    pub fn contains_standalone_comments(&self, depth_limit: usize) -> bool {
        self.leaves.iter().any(|leaf| {
            leaf.kind == TokenKind::StandaloneComment && leaf.bracket_depth <= depth_limit
        })
    }

    /// A trailing comma right before `closing` that asks for one item per
    /// line. One-element tuples `(a,)` do not count.
    fn has_magic_trailing_comma(&self, tree: &Tree, closing: &Leaf) -> bool {
        if !closing.kind.is_closing_bracket()
            || self.leaves.last().map(|leaf| leaf.kind) != Some(TokenKind::Comma)
        {
            return false;
        }
        if matches!(closing.kind, TokenKind::RBrace | TokenKind::RSqb) || self.is_import(tree) {
            return true;
        }
        closing
            .opening_bracket
            .is_some_and(|opening| !is_one_sequence_between(tree, opening, closing, &self.leaves))
    }

    /// Leaves with their index and rendered length, trailing comments
    /// included.
    pub fn leaf_lengths(
        &self,
    ) -> impl DoubleEndedIterator<Item = (usize, &Leaf, usize)> + '_ {
        self.leaves.iter().enumerate().map(|(index, leaf)| {
            let comments: usize = self
                .comments_after(leaf.id)
                .iter()
                .map(|comment| str_width(&comment.value))
                .sum();
            (index, leaf, str_width(&leaf.prefix) + str_width(&leaf.value) + comments)
        })
    }

    /// The rendered line without its newline.
    pub fn render(&self) -> String {
        let rendered = self.to_string();
        rendered.trim_matches('\n').to_owned()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.leaves.split_first() else {
            return f.write_str("\n");
        };
        write!(f, "{}{}{}", first.prefix, indent(self.depth), first.value)?;
        for leaf in rest {
            write!(f, "{}{}", leaf.prefix, leaf.value)?;
        }
        for comment in self.comments.iter().flat_map(|(_, comments)| comments) {
            write!(f, "{}{}", comment.prefix, comment.value)?;
        }
        f.write_str("\n")
    }
}

/// Display width of `s`.
#[inline]
pub fn str_width(s: &str) -> usize {
    s.chars().count()
}

/// True if `line` fits in `max_width`, has no multiline string and no
/// standalone comment.
pub fn is_line_short_enough(line: &Line, max_width: usize) -> bool {
    is_rendered_short_enough(line, &line.render(), max_width)
}

/// [`is_line_short_enough`] with a rendering computed by the caller.
pub fn is_rendered_short_enough(line: &Line, rendered: &str, max_width: usize) -> bool {
    str_width(rendered) <= max_width
        && !rendered.contains('\n')
        && !line.contains_standalone_comments(usize::MAX)
}

/// The leaf starts an import statement.
pub fn is_import(tree: &Tree, leaf: &Leaf) -> bool {
    (leaf.is_keyword("import") || leaf.is_keyword("from"))
        && tree.parent_kind(leaf.id) == Some(NodeKind::Import)
}

/// True if the content between a pair of parentheses is at most one
/// element: `(a)` or `(a,)`. A comma of an argument or parameter list
/// always counts as a sequence.
pub fn is_one_sequence_between(
    tree: &Tree,
    opening: ElementId,
    closing: &Leaf,
    leaves: &[Leaf],
) -> bool {
    let Some(start) = leaves.iter().position(|leaf| leaf.id == opening) else {
        return false;
    };
    if (leaves[start].kind, closing.kind) != (TokenKind::LPar, TokenKind::RPar) {
        return false;
    }

    let depth = closing.bracket_depth + 1;
    let mut commas = 0;
    for leaf in &leaves[start + 1..] {
        if leaf.id == closing.id {
            break;
        }
        if leaf.bracket_depth == depth && leaf.kind == TokenKind::Comma {
            commas += 1;
            if matches!(
                tree.parent_kind(leaf.id),
                Some(NodeKind::Arguments | NodeKind::Parameters)
            ) {
                commas += 1;
                break;
            }
        }
    }
    commas < 2
}

#[cfg(test)]
mod tests;
