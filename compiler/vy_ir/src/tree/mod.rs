//! Arena-backed concrete syntax tree.
//!
//! Every element lives in a slot of a flat `Vec`, addressed by `ElementId`.
//! A slot also records its parent and its position inside the parent, so
//! parent and sibling queries are index lookups. Positions are renumbered
//! whenever a node's child list is edited.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::{NodeKind, TokenKind};

const SYNTHETIC_BIT: u32 = 1 << 31;

static NEXT_SYNTHETIC: AtomicU32 = AtomicU32::new(0);

/// Index of an element in a [`Tree`].
///
/// Leaves created outside any tree (the commas the splitter adds, for
/// example) carry a synthetic id. Synthetic ids never resolve to a slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Placeholder for leaves that have not been placed in a tree yet.
    pub const DETACHED: ElementId = ElementId(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ElementId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// A fresh id that no tree will ever hand out.
    pub fn synthetic() -> Self {
        let n = NEXT_SYNTHETIC.fetch_add(1, Ordering::Relaxed) & !SYNTHETIC_BIT;
        ElementId(SYNTHETIC_BIT | n)
    }

    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.0 & SYNTHETIC_BIT != 0
    }
}

impl std::fmt::Debug for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_synthetic() {
            write!(f, "ElementId(synthetic {})", self.0 & !SYNTHETIC_BIT)
        } else {
            write!(f, "ElementId({})", self.0)
        }
    }
}

/// A terminal element.
///
/// Clones keep the `id`, which is how lines and the splitter refer back to
/// the tree position a leaf came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub id: ElementId,
    pub kind: TokenKind,
    pub value: String,
    /// Whitespace emitted before `value`. The parser stores one `\n` per
    /// blank source line here; the formatter replaces it.
    pub prefix: String,
    /// 1-based source line, 0 for synthesized leaves.
    pub line: u32,
    pub column: u32,
    pub bracket_depth: usize,
    /// For a closing bracket, the opening bracket it was matched with.
    pub opening_bracket: Option<ElementId>,
}

impl Leaf {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Leaf {
            id: ElementId::DETACHED,
            kind,
            value: value.into(),
            prefix: String::new(),
            line: 0,
            column: 0,
            bracket_depth: 0,
            opening_bracket: None,
        }
    }

    /// A leaf with a fresh synthetic id, not attached to any tree.
    pub fn synthetic(kind: TokenKind, value: impl Into<String>) -> Self {
        Leaf {
            id: ElementId::synthetic(),
            ..Leaf::new(kind, value)
        }
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Keyword leaf with the given spelling.
    #[inline]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == word
    }

    /// Bracket leaf with an empty value.
    #[inline]
    pub fn is_invisible_bracket(&self) -> bool {
        self.kind.is_bracket() && self.value.is_empty()
    }
}

/// An interior element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<ElementId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Node(Node),
    Leaf(Leaf),
}

/// Source text excluded from formatting by `# fmt: off` / `# fmt: on`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbatimRegion {
    /// First source line of the region, 1-based, inclusive.
    pub start_line: u32,
    /// Last source line of the region, inclusive.
    pub end_line: u32,
    /// The region's lines exactly as written, each ending in `\n`.
    pub text: String,
}

impl VerbatimRegion {
    #[inline]
    pub fn contains(&self, line: u32) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slot {
    pub(crate) element: Element,
    pub(crate) parent: Option<ElementId>,
    pub(crate) index: u32,
}

/// A parsed source file.
#[derive(Clone, Debug)]
pub struct Tree {
    slots: Vec<Slot>,
    root: ElementId,
    regions: Vec<VerbatimRegion>,
}

impl Tree {
    pub(crate) fn from_parts(
        slots: Vec<Slot>,
        root: ElementId,
        regions: Vec<VerbatimRegion>,
    ) -> Self {
        Tree {
            slots,
            root,
            regions,
        }
    }

    #[inline]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of allocated elements, detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn regions(&self) -> &[VerbatimRegion] {
        &self.regions
    }

    /// The fmt:off region covering `line`, if any.
    pub fn region_at(&self, line: u32) -> Option<&VerbatimRegion> {
        self.regions.iter().find(|region| region.contains(line))
    }

    #[inline]
    fn slot(&self, id: ElementId) -> Option<&Slot> {
        if id.is_synthetic() {
            return None;
        }
        self.slots.get(id.index())
    }

    #[inline]
    fn slot_mut(&mut self, id: ElementId) -> Option<&mut Slot> {
        if id.is_synthetic() {
            return None;
        }
        self.slots.get_mut(id.index())
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slot(id).map(|slot| &slot.element)
    }

    #[inline]
    pub fn leaf(&self, id: ElementId) -> Option<&Leaf> {
        match self.get(id) {
            Some(Element::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    #[inline]
    pub fn leaf_mut(&mut self, id: ElementId) -> Option<&mut Leaf> {
        match self.slot_mut(id).map(|slot| &mut slot.element) {
            Some(Element::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    #[inline]
    pub fn node(&self, id: ElementId) -> Option<&Node> {
        match self.get(id) {
            Some(Element::Node(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self, id: ElementId) -> bool {
        self.leaf(id).is_some()
    }

    #[inline]
    pub fn node_kind(&self, id: ElementId) -> Option<NodeKind> {
        self.node(id).map(|node| node.kind)
    }

    #[inline]
    pub fn token_kind(&self, id: ElementId) -> Option<TokenKind> {
        self.leaf(id).map(|leaf| leaf.kind)
    }

    #[inline]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.slot(id).and_then(|slot| slot.parent)
    }

    #[inline]
    pub fn parent_kind(&self, id: ElementId) -> Option<NodeKind> {
        self.parent(id).and_then(|parent| self.node_kind(parent))
    }

    /// Children of a node; empty for leaves.
    #[inline]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn prev_sibling(&self, id: ElementId) -> Option<ElementId> {
        let slot = self.slot(id)?;
        let index = slot.index as usize;
        if index == 0 {
            return None;
        }
        self.children(slot.parent?).get(index - 1).copied()
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let slot = self.slot(id)?;
        self.children(slot.parent?)
            .get(slot.index as usize + 1)
            .copied()
    }

    /// First leaf under `id` (itself when `id` is a leaf).
    pub fn first_leaf(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        loop {
            match self.get(current)? {
                Element::Leaf(_) => return Some(current),
                Element::Node(node) => current = *node.children.first()?,
            }
        }
    }

    /// Last leaf under `id` (itself when `id` is a leaf).
    pub fn last_leaf(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        loop {
            match self.get(current)? {
                Element::Leaf(_) => return Some(current),
                Element::Node(node) => current = *node.children.last()?,
            }
        }
    }

    /// All leaves under `id`, in source order.
    pub fn leaves(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.get(current) {
                Some(Element::Leaf(_)) => out.push(current),
                Some(Element::Node(node)) => stack.extend(node.children.iter().rev()),
                None => {}
            }
        }
        out
    }

    /// The leaf right before `id` in source order, crossing parents.
    ///
    /// Stops at the first previous sibling: when that sibling is a node
    /// without leaves, there is no answer.
    pub fn preceding_leaf(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        loop {
            if let Some(prev) = self.prev_sibling(current) {
                return self.last_leaf(prev);
            }
            current = self.parent(current)?;
        }
    }

    /// The leaf right after `id` in source order, crossing parents.
    pub fn next_leaf(&self, id: ElementId) -> Option<ElementId> {
        let mut current = id;
        loop {
            if let Some(next) = self.next_sibling(current) {
                return self.first_leaf(next);
            }
            current = self.parent(current)?;
        }
    }

    /// Prefix of the first leaf under `id`.
    pub fn prefix(&self, id: ElementId) -> &str {
        self.first_leaf(id)
            .and_then(|leaf| self.leaf(leaf))
            .map_or("", |leaf| leaf.prefix.as_str())
    }

    /// Add a detached leaf and return its id.
    pub fn alloc_leaf(&mut self, mut leaf: Leaf) -> ElementId {
        let id = self.next_id();
        leaf.id = id;
        self.slots.push(Slot {
            element: Element::Leaf(leaf),
            parent: None,
            index: 0,
        });
        id
    }

    /// Add a detached node owning `children`.
    pub fn alloc_node(&mut self, kind: NodeKind, children: Vec<ElementId>) -> ElementId {
        let id = self.next_id();
        self.slots.push(Slot {
            element: Element::Node(Node {
                kind,
                children: Vec::new(),
            }),
            parent: None,
            index: 0,
        });
        self.set_children(id, children);
        id
    }

    fn next_id(&self) -> ElementId {
        ElementId::from_raw(u32::try_from(self.slots.len()).unwrap_or(SYNTHETIC_BIT - 1))
    }

    /// Replace the child list of `id` and renumber every child's position.
    pub fn set_children(&mut self, id: ElementId, children: Vec<ElementId>) {
        for (index, &child) in children.iter().enumerate() {
            if let Some(slot) = self.slot_mut(child) {
                slot.parent = Some(id);
                slot.index = u32::try_from(index).unwrap_or(u32::MAX);
            }
        }
        if let Some(Slot {
            element: Element::Node(node),
            ..
        }) = self.slot_mut(id)
        {
            node.children = children;
        }
    }

    /// Put `new` where `old` is; `old` becomes detached.
    pub fn replace(&mut self, old: ElementId, new: ElementId) {
        let Some(parent) = self.parent(old) else {
            return;
        };
        let mut children = self.children(parent).to_vec();
        if let Some(position) = children.iter().position(|&child| child == old) {
            children[position] = new;
        }
        if let Some(slot) = self.slot_mut(old) {
            slot.parent = None;
            slot.index = 0;
        }
        self.set_children(parent, children);
    }

    /// Wrap `child` in an `Atom` with parentheses, in place.
    ///
    /// Invisible parentheses have empty values. The prefix of `child` moves
    /// to the opening parenthesis. Returns the new atom.
    pub fn wrap_in_parentheses(&mut self, child: ElementId, visible: bool) -> ElementId {
        let first = self.first_leaf(child).and_then(|id| self.leaf(id));
        let (prefix, line, column) =
            first.map_or((String::new(), 0, 0), |leaf| (leaf.prefix.clone(), leaf.line, leaf.column));
        if let Some(leaf) = self.first_leaf(child).and_then(|id| self.leaf_mut(id)) {
            leaf.prefix.clear();
        }
        let (end_line, end_column) = self
            .last_leaf(child)
            .and_then(|id| self.leaf(id))
            .map_or((line, column), |leaf| (leaf.line, leaf.column));

        let lpar = Leaf::new(TokenKind::LPar, if visible { "(" } else { "" })
            .with_prefix(prefix)
            .at(line, column);
        let rpar = Leaf::new(TokenKind::RPar, if visible { ")" } else { "" }).at(end_line, end_column);
        let lpar = self.alloc_leaf(lpar);
        let rpar = self.alloc_leaf(rpar);

        let parent = self.parent(child);
        let index = self.slot(child).map_or(0, |slot| slot.index as usize);
        let atom = self.alloc_node(NodeKind::Atom, vec![lpar, child, rpar]);
        if let Some(parent) = parent {
            let mut children = self.children(parent).to_vec();
            if index < children.len() {
                children[index] = atom;
            }
            self.set_children(parent, children);
        } else if self.root == child {
            self.root = atom;
        }
        atom
    }

    /// Concatenation of `prefix + value` for every leaf under `id`.
    pub fn source_text(&self, id: ElementId) -> String {
        let mut out = String::new();
        for leaf in self.leaves(id) {
            if let Some(leaf) = self.leaf(leaf) {
                out.push_str(&leaf.prefix);
                out.push_str(&leaf.value);
            }
        }
        out
    }

    /// Compact s-expression dump for tests and debugging.
    pub fn sexp(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.write_sexp(id, &mut out);
        out
    }

    fn write_sexp(&self, id: ElementId, out: &mut String) {
        match self.get(id) {
            Some(Element::Leaf(leaf)) => {
                let _ = write!(out, "{}:{:?}", leaf.kind, leaf.value);
            }
            Some(Element::Node(node)) => {
                let _ = write!(out, "({}", node.kind);
                for &child in &node.children {
                    out.push(' ');
                    self.write_sexp(child, out);
                }
                out.push(')');
            }
            None => out.push('?'),
        }
    }
}
