use pretty_assertions::assert_eq;
use vy_ir::TokenKind;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap_or_default()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn texts(source: &str) -> Vec<String> {
    lex(source)
        .unwrap_or_default()
        .iter()
        .map(|token| token.text(source).to_owned())
        .collect()
}

#[test]
fn operators_use_longest_match() {
    assert_eq!(
        texts("a //= b ** c >> 2 <= d\n"),
        ["a", "//=", "b", "**", "c", ">>", "2", "<=", "d", ""]
    );
    assert_eq!(kinds("x -> y\n")[1], TokenKind::Arrow);
    assert_eq!(kinds("...\n")[0], TokenKind::Ellipsis);
}

#[test]
fn numbers_and_names() {
    assert_eq!(
        kinds("0xFF 0b101 1_000 1.5 x1\n"),
        [
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Name,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn strings_with_prefixes_and_triple_quotes() {
    let source = "a = b\"\\x01\"\nc = '''x\n'y'\n'''\nd = \"\"\n";
    let texts = texts(source);
    assert!(texts.contains(&"b\"\\x01\"".to_owned()));
    assert!(texts.contains(&"'''x\n'y'\n'''".to_owned()));
    assert!(texts.contains(&"\"\"".to_owned()));
}

#[test]
fn unterminated_string_is_reported() {
    assert!(matches!(
        lex("x = \"abc\n"),
        Err(LexError::UnterminatedString { .. })
    ));
    assert!(matches!(
        lex("x = \"\"\"abc\n"),
        Err(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn unexpected_character_is_reported() {
    let err = lex("x = $\n");
    assert!(matches!(err, Err(LexError::UnexpectedCharacter { ch: '$', .. })));
}

#[test]
fn unbalanced_brackets_are_reported() {
    assert!(matches!(lex("x = )\n"), Err(LexError::UnmatchedBracket { bracket: ')', .. })));
    assert!(matches!(lex("x = (1,\n"), Err(LexError::UnclosedBracket { bracket: '(', .. })));
}

#[test]
fn line_continuation_is_whitespace() {
    assert_eq!(texts("a = b + \\\n    c\n"), ["a", "=", "b", "+", "c", ""]);
}

#[test]
fn normalize_strips_trailing_whitespace() {
    assert_eq!(normalize_source("a = 1  \r\nb = 2\t"), "a = 1\nb = 2\n");
    assert_eq!(normalize_source(""), "\n");
    assert_eq!(normalize_source("x\n"), "x\n");
}

#[test]
fn error_spans_point_into_source() {
    let source = "x = 1\ny = ]\n";
    let Err(err) = lex(source) else {
        panic!("expected an error");
    };
    assert_eq!(&source[err.span().to_range()], "]");
}

mod proptests {
    use proptest::prelude::*;

    use super::super::*;

    proptest! {
        #[test]
        fn indents_and_dedents_balance(lines in prop::collection::vec((0usize..3, "[a-z]{1,5}"), 1..20)) {
            // Every line opens a block when followed by a deeper one.
            let mut source = String::new();
            let mut depth = 0usize;
            for (target, name) in &lines {
                let next = (*target).min(depth + 1);
                if next > depth && !source.is_empty() {
                    source.pop();
                    source.push_str(":\n");
                }
                depth = if source.is_empty() { 0 } else { next };
                source.push_str(&"    ".repeat(depth));
                source.push_str(name);
                source.push('\n');
            }
            let tokens = lex(&source).unwrap_or_default();
            let indents = tokens.iter().filter(|t| t.kind == vy_ir::TokenKind::Indent).count();
            let dedents = tokens.iter().filter(|t| t.kind == vy_ir::TokenKind::Dedent).count();
            prop_assert_eq!(indents, dedents);
        }
    }
}
