//! Bottom-up construction of a [`Tree`].
//!
//! The parser opens a node, pushes leaves and nested nodes, then closes it.
//! A [`Checkpoint`] lets it decide the kind of a node after its first child
//! has been parsed (`a + b` only becomes a `BinOp` once `+` is seen).

use crate::tree::{Element, Node, Slot};
use crate::{ElementId, Leaf, NodeKind, Tree, VerbatimRegion};

/// Position in the pending child list, see [`TreeBuilder::start_node_at`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Default)]
pub struct TreeBuilder {
    slots: Vec<Slot>,
    open: Vec<(NodeKind, usize)>,
    pending: Vec<ElementId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: NodeKind) {
        self.open.push((kind, self.pending.len()));
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pending.len())
    }

    /// Open a node that adopts everything pushed since `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: NodeKind) {
        let start = checkpoint.0.min(self.pending.len());
        self.open.push((kind, start));
    }

    /// Number of elements pushed since `checkpoint`.
    #[inline]
    pub fn pushed_since(&self, checkpoint: Checkpoint) -> usize {
        self.pending.len().saturating_sub(checkpoint.0)
    }

    pub fn push_leaf(&mut self, mut leaf: Leaf) -> ElementId {
        let id = self.next_id();
        leaf.id = id;
        self.slots.push(Slot {
            element: Element::Leaf(leaf),
            parent: None,
            index: 0,
        });
        self.pending.push(id);
        id
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self) -> Option<ElementId> {
        let (kind, start) = self.open.pop()?;
        let children: Vec<ElementId> = self.pending.drain(start..).collect();
        let id = self.alloc_node(kind, children);
        self.pending.push(id);
        Some(id)
    }

    fn next_id(&self) -> ElementId {
        ElementId::from_raw(u32::try_from(self.slots.len()).unwrap_or(u32::MAX >> 1))
    }

    fn alloc_node(&mut self, kind: NodeKind, children: Vec<ElementId>) -> ElementId {
        let id = self.next_id();
        for (index, child) in children.iter().enumerate() {
            if let Some(slot) = self.slots.get_mut(child.index()) {
                slot.parent = Some(id);
                slot.index = u32::try_from(index).unwrap_or(u32::MAX);
            }
        }
        self.slots.push(Slot {
            element: Element::Node(Node { kind, children }),
            parent: None,
            index: 0,
        });
        id
    }

    /// Close every open node and produce the tree.
    ///
    /// Anything left at the top level besides a single `Module` is gathered
    /// into one.
    pub fn finish(mut self, regions: Vec<VerbatimRegion>) -> Tree {
        while self.finish_node().is_some() {}
        let single_module = match self.pending.as_slice() {
            [only] => match self.slots.get(only.index()).map(|slot| &slot.element) {
                Some(Element::Node(node)) if node.kind == NodeKind::Module => Some(*only),
                _ => None,
            },
            _ => None,
        };
        let root = match single_module {
            Some(root) => root,
            None => {
                let children = std::mem::take(&mut self.pending);
                self.alloc_node(NodeKind::Module, children)
            }
        };
        Tree::from_parts(self.slots, root, regions)
    }
}
