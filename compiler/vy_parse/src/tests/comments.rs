//! Comment placement tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vy_ir::{NodeKind, TokenKind, Tree};

use crate::Parser;

fn parse(source: &str) -> Tree {
    Parser::new().parse(source).expect("source should parse")
}

/// Kind of the parent of every comment leaf, in source order.
fn comment_parents(tree: &Tree) -> Vec<(TokenKind, NodeKind)> {
    tree.leaves(tree.root())
        .into_iter()
        .filter_map(|id| {
            let kind = tree.token_kind(id)?;
            if !kind.is_comment() {
                return None;
            }
            Some((kind, tree.parent_kind(id)?))
        })
        .collect()
}

#[test]
fn trailing_comment_joins_the_statement() {
    let tree = parse("x: uint256  # balance\n");
    assert_eq!(
        comment_parents(&tree),
        [(TokenKind::Comment, NodeKind::VariableDef)]
    );
}

#[test]
fn standalone_comments_are_statement_siblings() {
    let tree = parse("# header\n\n# about x\nx: uint256\n");
    assert_eq!(
        comment_parents(&tree),
        [
            (TokenKind::StandaloneComment, NodeKind::Module),
            (TokenKind::StandaloneComment, NodeKind::Module)
        ]
    );
    let second = tree.children(tree.root())[1];
    assert_eq!(tree.leaf(second).unwrap().prefix, "\n");
}

#[test]
fn comment_after_block_follows_its_indentation() {
    let inside = parse("def f():\n    pass\n    # still inside\nx: uint256\n");
    assert_eq!(
        comment_parents(&inside),
        [(TokenKind::StandaloneComment, NodeKind::Body)]
    );
    let outside = parse("def f():\n    pass\n# outside\nx: uint256\n");
    assert_eq!(
        comment_parents(&outside),
        [(TokenKind::StandaloneComment, NodeKind::Module)]
    );
}

#[test]
fn comment_between_decorator_and_def() {
    let tree = parse("@external\n# note\ndef f():\n    pass\n");
    assert_eq!(
        comment_parents(&tree),
        [(TokenKind::StandaloneComment, NodeKind::Decorators)]
    );
}

#[test]
fn comment_inside_brackets_joins_expression() {
    let tree = parse("x: uint256 = f(\n    a,  # first\n    # second\n    b,\n)\n");
    assert_eq!(
        comment_parents(&tree),
        [
            (TokenKind::Comment, NodeKind::Arguments),
            (TokenKind::StandaloneComment, NodeKind::Arguments)
        ]
    );
}

#[test]
fn comment_after_header_colon() {
    let tree = parse("def f():  # why\n    pass\n");
    assert_eq!(
        comment_parents(&tree),
        [(TokenKind::Comment, NodeKind::FunctionSig)]
    );
}

#[test]
fn comment_at_end_of_file() {
    let tree = parse("x: uint256\n\n# bye\n");
    let last = *tree.children(tree.root()).last().unwrap();
    let leaf = tree.leaf(last).unwrap();
    assert_eq!(leaf.kind, TokenKind::StandaloneComment);
    assert_eq!(leaf.value, "# bye");
    assert_eq!(leaf.prefix, "\n");
}
