//! Vyper CST - concrete syntax tree for the formatter
//!
//! This crate holds the data the rest of the pipeline passes around:
//! - Token and rule kinds (`TokenKind`, `NodeKind`)
//! - An arena tree of `Leaf`/`Node` elements addressed by `ElementId`
//! - `TreeBuilder` for bottom-up construction by the parser
//! - Source spans for diagnostics
//!
//! # Design
//!
//! - **Flat arena**: parent and sibling links are indices, not references
//! - **Full fidelity**: every token and comment of the source is a leaf
//! - **Identity by id**: a cloned `Leaf` keeps the id of its tree position

mod builder;
mod kind;
mod span;
mod tree;

pub use builder::{Checkpoint, TreeBuilder};
pub use kind::{NodeKind, TokenKind};
pub use span::Span;
pub use tree::{Element, ElementId, Leaf, Node, Tree, VerbatimRegion};
