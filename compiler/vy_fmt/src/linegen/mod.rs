//! Line generation.
//!
//! [`LineGenerator`] walks the tree depth-first and cuts it into logical
//! [`Line`]s: one per statement, declaration header, decorator or
//! standalone comment. Lines come out lazily, one per call to
//! [`LineGenerator::next_line`].
//!
//! The walk keeps an explicit work stack instead of recursing, so a deeply
//! nested tree never grows the call stack. Visiting a node may push a
//! [`Step::Flush`] between its children; that is how statement keywords
//! and single-line bodies end the line in progress at the right moment.
//!
//! Visiting also normalizes the tree: optional parentheses are added or
//! made invisible (see [`parens`]) before a statement's children are
//! visited.

mod parens;

use std::collections::VecDeque;
use std::mem;

use tracing::trace;
use vy_ir::{Element, ElementId, Leaf, NodeKind, TokenKind, Tree};

use crate::brackets::BracketMatchError;
use crate::comments::{is_pragma, normalize_comment};
use crate::config::indent;
use crate::line::Line;
use crate::strings::{format_docstring, normalize_string_quotes};

use parens::normalize_invisible_parens;

/// Pending work of the depth-first walk.
#[derive(Copy, Clone, Debug)]
enum Step {
    Visit(ElementId),
    /// End the line in progress, then shift the depth by the delta.
    Flush(isize),
}

/// Produces the logical lines of a tree.
pub struct LineGenerator {
    tree: Tree,
    stack: Vec<Step>,
    ready: VecDeque<Line>,
    current: Line,
    max_width: usize,
    done: bool,
}

impl LineGenerator {
    pub fn new(tree: Tree, max_width: usize) -> Self {
        let root = tree.root();
        LineGenerator {
            tree,
            stack: vec![Step::Visit(root)],
            ready: VecDeque::new(),
            current: Line::default(),
            max_width,
            done: false,
        }
    }

    /// The tree being walked, with the normalizations applied so far.
    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The next logical line, or `None` once the tree is exhausted.
    ///
    /// After an error no more lines are produced.
    pub fn next_line(&mut self) -> Option<Result<Line, BracketMatchError>> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }
            let Some(step) = self.stack.pop() else {
                self.done = true;
                let last = mem::take(&mut self.current);
                return (!last.is_empty()).then_some(Ok(last));
            };

            let result = match step {
                Step::Visit(id) => self.visit(id),
                Step::Flush(delta) => {
                    self.line(delta);
                    Ok(())
                }
            };
            if let Err(err) = result {
                self.done = true;
                self.stack.clear();
                self.ready.clear();
                return Some(Err(err));
            }
        }
    }

    /// End the current line if it has content, and move the next one
    /// `delta` levels deeper. An empty line only changes depth.
    fn line(&mut self, delta: isize) {
        let depth = self.current.depth.saturating_add_signed(delta);
        if self.current.is_empty() {
            self.current.depth = depth;
            return;
        }
        let complete = mem::replace(&mut self.current, Line::new(depth, false));
        trace!(depth = complete.depth, leaves = complete.leaves.len(), "line");
        self.ready.push_back(complete);
    }

    fn visit(&mut self, id: ElementId) -> Result<(), BracketMatchError> {
        match self.tree.get(id) {
            Some(Element::Leaf(leaf)) => {
                let leaf = leaf.clone();
                self.visit_leaf(leaf)
            }
            Some(Element::Node(node)) => {
                let kind = node.kind;
                self.visit_node(id, kind);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn push_children(&mut self, id: ElementId) {
        let children = self.tree.children(id);
        self.stack
            .extend(children.iter().rev().map(|&child| Step::Visit(child)));
    }

    /// Push the children of `id`, each one accepted by `flush_before`
    /// preceded by a flush.
    fn push_children_flushing(
        &mut self,
        id: ElementId,
        flush_before: impl Fn(&Tree, ElementId) -> bool,
    ) {
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(Step::Visit(child));
            if flush_before(&self.tree, child) {
                self.stack.push(Step::Flush(0));
            }
        }
    }

    fn visit_node(&mut self, id: ElementId, kind: NodeKind) {
        match kind {
            NodeKind::Decorators => self.push_children_flushing(id, |_, _| true),
            NodeKind::Import => {
                let leading = self
                    .tree
                    .children(id)
                    .first()
                    .and_then(|&first| self.tree.leaf(first));
                if leading.is_some_and(|leaf| leaf.is_keyword("import") || leaf.is_keyword("from"))
                {
                    self.line(0);
                }
                self.push_children(id);
            }
            NodeKind::IfStmt => {
                normalize_invisible_parens(&mut self.tree, id, |leaf| {
                    leaf.is_keyword("if") || leaf.is_keyword("elif")
                });
                self.push_children_flushing(id, |tree, child| {
                    tree.leaf(child).is_some_and(|leaf| {
                        leaf.is_keyword("if") || leaf.is_keyword("elif") || leaf.is_keyword("else")
                    })
                });
            }
            NodeKind::ForStmt => self.push_children_flushing(id, |tree, child| {
                tree.leaf(child).is_some_and(|leaf| leaf.is_keyword("for"))
            }),
            NodeKind::FunctionSig => self.push_children_flushing(id, |tree, child| {
                tree.token_kind(child) == Some(TokenKind::FuncDecl)
            }),
            NodeKind::Call | NodeKind::ExternalCall
                if self.tree.parent_kind(id).is_some_and(NodeKind::is_body) =>
            {
                self.line(0);
                self.push_children(id);
            }
            _ if kind.is_simple_statement() => self.visit_simple_statement(id, kind),
            _ => self.push_children(id),
        }
    }

    /// A statement without nested statements starts its own line. As the
    /// only statement of a single-line body it is also indented.
    fn visit_simple_statement(&mut self, id: ElementId, kind: NodeKind) {
        if kind.is_assignment() {
            normalize_invisible_parens(&mut self.tree, id, |leaf| {
                matches!(leaf.kind, TokenKind::Equal | TokenKind::AugAssign)
            });
        } else if kind == NodeKind::AssertStmt {
            normalize_invisible_parens(&mut self.tree, id, |leaf| {
                leaf.is_keyword("assert") || leaf.kind == TokenKind::Comma
            });
        } else if kind == NodeKind::ReturnStmt {
            normalize_invisible_parens(&mut self.tree, id, |leaf| leaf.is_keyword("return"));
        }

        let body_like = self.tree.parent_kind(id) == Some(NodeKind::Body)
            && self.tree.prev_sibling(id).is_none();
        if body_like {
            self.line(1);
            self.stack.push(Step::Flush(-1));
        } else {
            self.line(0);
        }
        self.push_children(id);
    }

    fn visit_leaf(&mut self, mut leaf: Leaf) -> Result<(), BracketMatchError> {
        match leaf.kind {
            TokenKind::Newline => {
                self.line(0);
                return Ok(());
            }
            TokenKind::Indent => {
                self.line(1);
                return Ok(());
            }
            TokenKind::Dedent => {
                self.line(0);
                self.line(-1);
                return Ok(());
            }
            TokenKind::String => leaf.value = normalize_string_quotes(&leaf.value),
            TokenKind::Docstring => {
                if !self.is_module_docstring(leaf.id) {
                    leaf.value =
                        format_docstring(&leaf.value, &indent(self.current.depth), self.max_width);
                }
            }
            TokenKind::Comment => {
                let any_open = self.current.bracket_tracker.any_open_brackets();
                leaf.value = normalize_comment(&leaf.value).into_owned();
                self.current.append(&self.tree, leaf, false)?;
                if !any_open {
                    self.line(0);
                }
                return Ok(());
            }
            TokenKind::StandaloneComment => return self.visit_standalone_comment(leaf),
            _ => {}
        }

        if !self.current.leaves.is_empty() {
            leaf.prefix.clear();
        }
        self.current.append(&self.tree, leaf, false)
    }

    fn visit_standalone_comment(&mut self, mut leaf: Leaf) -> Result<(), BracketMatchError> {
        if !leaf.prefix.is_empty() {
            leaf.prefix = "\n".to_owned();
        }
        leaf.value = normalize_comment(&leaf.value).into_owned();

        let any_open = self.current.bracket_tracker.any_open_brackets();
        if !any_open {
            if is_pragma(&leaf.value) {
                leaf.kind = TokenKind::Pragma;
            }
            self.line(0);
        }
        self.current.append(&self.tree, leaf, false)?;
        if !any_open {
            self.line(0);
        }
        Ok(())
    }

    fn is_module_docstring(&self, id: ElementId) -> bool {
        self.tree
            .parent(id)
            .is_some_and(|parent| self.tree.parent_kind(parent) == Some(NodeKind::Module))
    }
}

impl Iterator for LineGenerator {
    type Item = Result<Line, BracketMatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
