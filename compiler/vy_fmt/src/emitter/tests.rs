#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vy_parse::Parser;

use super::*;

#[test]
fn string_emitter_basic() {
    let mut emitter = StringEmitter::new();
    emitter.emit("hello");
    emitter.emit_newline();
    emitter.emit("world");
    assert_eq!(emitter.output(), "hello\nworld");
}

#[test]
fn string_emitter_blank_lines() {
    let mut emitter = StringEmitter::with_capacity(16);
    emitter.emit("a\n");
    emitter.emit_blank_lines(2);
    emitter.emit("b\n");
    assert_eq!(emitter.as_str(), "a\n\n\nb\n");
}

#[test]
fn zero_blank_lines_emit_nothing() {
    let mut emitter = StringEmitter::new();
    emitter.emit_blank_lines(0);
    assert_eq!(emitter.output(), "");
}

#[test]
fn emitted_line_is_indented_and_terminated() {
    let tree = Parser::new().parse("pass\n").unwrap();
    let first = tree.first_leaf(tree.root()).unwrap();
    let mut line = Line::new(2, false);
    line.append(&tree, tree.leaf(first).unwrap().clone(), true).unwrap();
    let mut emitter = StringEmitter::new();
    emitter.emit_line(&line);
    assert_eq!(emitter.output(), "        pass\n");
}
