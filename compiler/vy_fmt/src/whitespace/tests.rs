#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use vy_parse::Parser;

use super::whitespace;

/// Join the leaves of a one-line statement with computed whitespace.
fn spaced(source: &str) -> String {
    let tree = Parser::new().parse(source).unwrap();
    let mut out = String::new();
    for id in tree.leaves(tree.root()) {
        let leaf = tree.leaf(id).unwrap();
        if leaf.kind.is_layout() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(whitespace(&tree, leaf));
        }
        out.push_str(&leaf.value);
    }
    out
}

#[test]
fn call_like_parentheses_hug() {
    assert_eq!(spaced("a: constant( uint256 ) = 0\n"), "a: constant(uint256) = 0");
    assert_eq!(spaced("x = foo (a,b)\n"), "x = foo(a, b)");
}

#[test]
fn subscripts_hug() {
    assert_eq!(spaced("x: HashMap [address , uint256]\n"), "x: HashMap[address, uint256]");
}

#[test]
fn keyword_arguments_have_no_spaces() {
    assert_eq!(spaced("x = f(a, b = c, d=-1)\n"), "x = f(a, b=c, d=-1)");
}

#[test]
fn attribute_access_has_no_spaces() {
    assert_eq!(spaced("x = self . balances [ msg . sender ]\n"), "x = self.balances[msg.sender]");
}

#[test]
fn unary_operators_hug_their_operand() {
    assert_eq!(spaced("x = - a + ~ b\n"), "x = -a + ~b");
    assert_eq!(spaced("x = - ( a )\n"), "x = -(a)");
}

#[test]
fn binary_operators_are_spaced() {
    assert_eq!(spaced("x=a*b-c**2\n"), "x = a * b - c ** 2");
}

#[test]
fn decorators_have_no_spaces() {
    assert_eq!(
        spaced("@ nonreentrant ( \"lock\" )\ndef f():\n    pass\n"),
        "@nonreentrant(\"lock\") def f(): pass"
    );
}

#[test]
fn return_type_is_spaced() {
    assert_eq!(
        spaced("def f(a:uint256)->uint256:\n    pass\n"),
        "def f(a: uint256) -> uint256: pass"
    );
}

#[test]
fn import_paths_have_no_spaces() {
    assert_eq!(spaced("from . import a\n"), "from . import a");
    assert_eq!(spaced("from .. a . b import c\n"), "from ..a.b import c");
    assert_eq!(spaced("import a . b as c\n"), "import a.b as c");
}

#[test]
fn trailing_comment_gets_two_spaces() {
    assert_eq!(spaced("x = 1 # one\n"), "x = 1  # one");
}

#[test]
fn collections_are_spaced_after_commas() {
    assert_eq!(spaced("x = [ 1,2 ]\n"), "x = [1, 2]");
    assert_eq!(spaced("x = {a : 1}\n"), "x = {a: 1}");
}
