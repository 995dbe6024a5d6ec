use pretty_assertions::assert_eq;
use vy_ir::Span;
use vy_lexer::LexError;

use super::ParseError;

#[test]
fn located_counts_lines_and_characters() {
    let source = "x = 1\ny = é$\n";
    let offset = u32::try_from(source.find('$').unwrap_or(0)).unwrap_or(0);
    let err = ParseError::new("unexpected", Span::new(offset, offset + 1)).located(source);
    assert_eq!((err.line, err.column), (2, 6));
    assert_eq!(err.to_string(), "2:6: unexpected");
}

#[test]
fn located_clamps_past_the_end() {
    let err = ParseError::new("eof", Span::new(100, 100)).located("a\n");
    assert_eq!((err.line, err.column), (2, 1));
}

#[test]
fn lex_errors_keep_their_span() {
    let lex = LexError::UnmatchedBracket {
        bracket: ')',
        span: Span::new(3, 4),
    };
    let err = ParseError::from(lex);
    assert_eq!(err.span, Span::new(3, 4));
    assert_eq!(err.message, "unmatched closing bracket ')'");
}
