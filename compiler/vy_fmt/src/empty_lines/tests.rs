#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vy_parse::Parser;

use super::*;
use crate::linegen::LineGenerator;

/// `(rendered line, before, after)` for every logical line of `source`.
fn blank_lines(source: &str) -> Vec<(String, usize, usize)> {
    let tree = Parser::new().parse(source).unwrap();
    let mut generator = LineGenerator::new(tree, 80);
    let mut tracker = EmptyLineTracker::new();
    let mut out = Vec::new();
    while let Some(line) = generator.next_line() {
        let mut line = line.unwrap();
        let (before, after) = tracker.maybe_empty_lines(generator.tree(), &mut line);
        out.push((line.render(), before, after));
    }
    out
}

fn befores(source: &str) -> Vec<usize> {
    blank_lines(source).into_iter().map(|(_, before, _)| before).collect()
}

#[test]
fn first_line_never_gets_blank_lines() {
    assert_eq!(befores("\n\n\nx = 1\n"), [0]);
    assert_eq!(befores("def f():\n    pass\n"), [0, 0]);
}

#[test]
fn source_blank_lines_are_capped_at_two() {
    assert_eq!(befores("x = 1\n\n\n\n\ny = 2\n"), [0, 2]);
    assert_eq!(befores("x = 1\n\ny = 2\n"), [0, 1]);
    assert_eq!(befores("x = 1\ny = 2\n"), [0, 0]);
}

#[test]
fn top_level_declarations_get_two_blank_lines() {
    assert_eq!(
        befores("x: uint256\ndef f():\n    pass\nstruct S:\n    a: uint256\n"),
        [0, 2, 0, 2, 0]
    );
}

#[test]
fn code_after_a_declaration_is_separated() {
    assert_eq!(befores("def f():\n    pass\nx: uint256\n"), [0, 0, 2]);
}

#[test]
fn decorators_stick_to_their_function() {
    assert_eq!(
        befores("x: uint256\n@external\n\n@view\n\ndef f():\n    pass\n"),
        [0, 2, 0, 0, 0]
    );
}

#[test]
fn flow_control_asks_for_a_blank_line_after() {
    let lines = blank_lines("def f():\n    return 1\ndef g():\n    pass\n");
    assert_eq!(lines[1], ("    return 1".to_owned(), 0, 1));
    // One blank line already follows the return.
    assert_eq!(lines[2], ("def g():".to_owned(), 1, 0));
}

#[test]
fn imports_are_set_off_from_code() {
    assert_eq!(befores("import a\nfrom b import c\nx: uint256\n"), [0, 0, 1]);
}

#[test]
fn pragma_comment_and_decorated_function() {
    let lines = blank_lines("# @version 0.3.1\n\n# Token\n@external\ndef f():\n    pass\n");
    let summary: Vec<(usize, usize)> = lines.iter().map(|(_, b, a)| (*b, *a)).collect();
    assert_eq!(summary, [(0, 1), (0, 0), (0, 0), (0, 0), (0, 0)]);
    assert_eq!(lines[1].0, "# Token");
}

#[test]
fn comment_separated_from_declaration_keeps_declaration_padding() {
    assert_eq!(befores("x: uint256\n# note\n\ndef f():\n    pass\n"), [0, 0, 2, 0]);
}

#[test]
fn nested_declaration_after_its_header() {
    assert_eq!(
        befores("interface I:\n    def f() -> uint256: view\n"),
        [0, 0]
    );
}

#[test]
fn prefix_is_consumed() {
    let tree = Parser::new().parse("x = 1\n\ny = 2\n").unwrap();
    let mut generator = LineGenerator::new(tree, 80);
    let mut tracker = EmptyLineTracker::new();
    let mut lines = Vec::new();
    while let Some(line) = generator.next_line() {
        let mut line = line.unwrap();
        tracker.maybe_empty_lines(generator.tree(), &mut line);
        lines.push(line);
    }
    assert!(lines.iter().all(|line| line.leaves[0].prefix.is_empty()));
}

#[test]
fn flow_control_blank_line_counts_toward_declaration_separation() {
    let lines = blank_lines("def f():\n    return 1\nx: uint256\n");
    let counts: Vec<(usize, usize)> = lines.iter().map(|&(_, b, a)| (b, a)).collect();
    assert_eq!(counts, [(0, 0), (0, 1), (0, 0)]);
}

#[test]
fn leaving_a_nested_block_after_a_declaration() {
    assert_eq!(
        befores("struct S:\n    a: uint256\nx: uint256\ny: uint256\n"),
        [0, 0, 2, 0]
    );
}
