#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vy_ir::{Leaf, TokenKind, Tree};
use vy_parse::Parser;

use super::*;

fn parse(source: &str) -> Tree {
    Parser::new().parse(source).unwrap()
}

/// Append the leaves of `ids` to a fresh line, skipping layout tokens.
fn line_from(tree: &Tree, ids: impl IntoIterator<Item = ElementId>) -> Line {
    let mut line = Line::new(0, false);
    for id in ids {
        let leaf = tree.leaf(id).unwrap().clone();
        if leaf.kind.is_layout() {
            continue;
        }
        line.append(tree, leaf, false).unwrap();
    }
    line
}

/// The first source line of `source` as a logical line.
fn first_line(source: &str) -> (Tree, Line) {
    let tree = parse(source);
    let ids: Vec<_> = tree
        .leaves(tree.root())
        .into_iter()
        .take_while(|&id| tree.token_kind(id) != Some(TokenKind::Newline))
        .collect();
    let line = line_from(&tree, ids);
    (tree, line)
}

fn leaf<'a>(line: &'a Line, value: &str) -> &'a Leaf {
    line.leaves.iter().find(|leaf| leaf.value == value).unwrap()
}

#[test]
fn test_render_with_indentation() {
    let (_, mut line) = first_line("x = foo (a,b)\n");
    assert_eq!(line.to_string(), "x = foo(a, b)\n");
    line.depth = 2;
    assert_eq!(line.to_string(), "        x = foo(a, b)\n");
    assert_eq!(line.render(), "        x = foo(a, b)");
}

#[test]
fn test_empty_line_renders_as_newline() {
    let line = Line::new(3, false);
    assert!(line.is_empty());
    assert_eq!(line.to_string(), "\n");
}

#[test]
fn test_trailing_comment_is_put_aside() {
    let (_, line) = first_line("x = 1 #hi\n");
    assert_eq!(line.leaves.len(), 3);
    let one = leaf(&line, "1").id;
    assert_eq!(line.comments_after(one).len(), 1);
    assert_eq!(line.to_string(), "x = 1  #hi\n");
}

#[test]
fn test_comment_on_empty_line_becomes_standalone() {
    let tree = parse("x = 1  # c\n");
    let comment = tree
        .leaves(tree.root())
        .into_iter()
        .find(|&id| tree.token_kind(id) == Some(TokenKind::Comment))
        .unwrap();
    let line = line_from(&tree, [comment]);
    assert_eq!(line.leaves[0].kind, TokenKind::StandaloneComment);
    assert!(line.is_comment());
    assert!(!line.accepts(&Leaf::new(TokenKind::Name, "y")));
}

#[test]
fn test_is_comment_needs_a_single_comment_leaf() {
    assert!(!Line::new(0, false).is_comment());
    let (_, code) = first_line("x = 1  # c\n");
    assert!(!code.is_comment());
    let (_, docstring) = first_line("\"\"\"doc\"\"\"\n");
    assert!(docstring.is_comment());
}

#[test]
fn test_magic_trailing_comma() {
    let (_, call) = first_line("x = foo(a,)\n");
    assert_eq!(call.magic_trailing_comma, Some(leaf(&call, ")").id));

    let (_, list) = first_line("x = [a,]\n");
    assert!(list.magic_trailing_comma.is_some());

    let (_, tuple) = first_line("x = (a,)\n");
    assert_eq!(tuple.magic_trailing_comma, None);

    let (_, pair) = first_line("x = (a, b,)\n");
    assert!(pair.magic_trailing_comma.is_some());

    let (_, plain) = first_line("x = foo(a)\n");
    assert_eq!(plain.magic_trailing_comma, None);
}

#[test]
fn test_one_sequence_between() {
    let (tree, line) = first_line("x = (a, b, c)\n");
    let close = line.leaves.last().unwrap();
    assert!(!is_one_sequence_between(&tree, line.leaves[2].id, close, &line.leaves));

    let (tree, line) = first_line("x = (a, (b, c))\n");
    let close = line.leaves.last().unwrap();
    assert!(is_one_sequence_between(&tree, line.leaves[2].id, close, &line.leaves));

    let (tree, line) = first_line("x = (a,)\n");
    let close = line.leaves.last().unwrap();
    assert!(is_one_sequence_between(&tree, line.leaves[2].id, close, &line.leaves));
}

#[test]
fn test_line_kinds() {
    let (tree, import) = first_line("from a import b\n");
    assert!(import.is_import(&tree));
    assert!(!import.is_def(&tree));

    let (tree, def) = first_line("def foo(): pass\n");
    assert!(def.is_def(&tree));
    assert_eq!(def.to_string(), "def foo(): pass\n");

    let (_, decorator) = first_line("@external\ndef foo(): pass\n");
    assert!(decorator.is_decorator());

    let (_, flow) = first_line("return x\n");
    assert!(flow.is_flow_control());

    let (tree, assign) = first_line("x = 1\n");
    assert!(!assign.is_import(&tree));
    assert!(!assign.is_flow_control());
    assert!(!assign.is_pragma());
}

#[test]
fn test_interface_signature_is_not_a_def() {
    let tree = parse("interface I:\n    def f() -> uint256: view\n");
    let ids: Vec<_> = tree
        .leaves(tree.root())
        .into_iter()
        .skip_while(|&id| tree.token_kind(id) != Some(TokenKind::Indent))
        .take_while(|&id| tree.token_kind(id) != Some(TokenKind::Dedent))
        .collect();
    let line = line_from(&tree, ids);
    assert_eq!(line.render(), "def f() -> uint256: view");
    assert!(!line.is_def(&tree));
}

#[test]
fn test_standalone_comment_inside_brackets_is_a_leaf() {
    let tree = parse("x = foo(\n    # note\n    a,\n)\n");
    let line = line_from(&tree, tree.leaves(tree.root()));
    let comment = leaf(&line, "# note");
    assert_eq!(comment.kind, TokenKind::StandaloneComment);
    assert_eq!(comment.bracket_depth, 1);
    assert!(line.contains_standalone_comments(usize::MAX));
    assert!(!line.contains_standalone_comments(0));
    assert!(!is_line_short_enough(&line, 80));
}

#[test]
fn test_leaf_lengths_count_comments() {
    let (_, line) = first_line("x = 1  # hi\n");
    let lengths: Vec<_> = line.leaf_lengths().map(|(i, _, len)| (i, len)).collect();
    assert_eq!(lengths, [(0, 1), (1, 2), (2, 6)]);
    let reversed: Vec<_> = line.leaf_lengths().rev().map(|(i, _, _)| i).collect();
    assert_eq!(reversed, [2, 1, 0]);
}

#[test]
fn test_short_enough() {
    let (_, line) = first_line("x = foo(a, b)\n");
    assert!(is_line_short_enough(&line, 13));
    assert!(!is_line_short_enough(&line, 12));
}
