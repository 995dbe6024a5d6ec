use pretty_assertions::assert_eq;

use super::*;

#[test]
fn single_quotes_become_double() {
    assert_eq!(normalize_string_quotes("'hello'"), "\"hello\"");
    assert_eq!(normalize_string_quotes("b'abc'"), "b\"abc\"");
    assert_eq!(normalize_string_quotes("'''doc'''"), "\"\"\"doc\"\"\"");
}

#[test]
fn double_quotes_are_kept() {
    assert_eq!(normalize_string_quotes("\"hello\""), "\"hello\"");
    assert_eq!(normalize_string_quotes("\"\"\"x\"\"\""), "\"\"\"x\"\"\"");
}

#[test]
fn escaped_quote_is_unescaped_when_switching() {
    assert_eq!(normalize_string_quotes(r"'it\'s'"), "\"it's\"");
}

#[test]
fn switch_is_skipped_when_it_adds_escapes() {
    assert_eq!(normalize_string_quotes("'say \"hi\"'"), "'say \"hi\"'");
}

#[test]
fn unnecessary_escape_is_dropped_even_when_quotes_stay() {
    assert_eq!(normalize_string_quotes(r#""don\'t""#), "\"don't\"");
}

#[test]
fn multiline_detection_needs_triple_quotes() {
    assert!(is_multiline_string("\"\"\"a\nb\"\"\""));
    assert!(!is_multiline_string("\"\"\"ab\"\"\""));
    assert!(!is_multiline_string("\"ab\""));
}

#[test]
fn fix_docstring_reindents_continuation_lines() {
    let docstring = "Summary.\n        More text.\n\n        End.\n    ";
    assert_eq!(
        fix_docstring(docstring, "    "),
        "Summary.\n    More text.\n\n    End.\n    "
    );
}

#[test]
fn fix_docstring_expands_leading_tabs() {
    assert_eq!(fix_docstring("A.\n\tB.\n", ""), "A.\nB.");
    assert_eq!(fix_docstring("", "    "), "");
}

#[test]
fn one_line_docstring_is_stripped() {
    assert_eq!(
        format_docstring("'''   Hello.   '''", "    ", 80),
        "\"\"\"Hello.\"\"\""
    );
}

#[test]
fn docstring_ending_in_quote_is_padded() {
    assert_eq!(
        format_docstring("\"\"\"He said \"hi\" \"\"\"", "", 80),
        "\"\"\"He said \"hi\" \"\"\""
    );
}

#[test]
fn blank_docstring_keeps_one_space() {
    assert_eq!(format_docstring("\"   \"", "    ", 80), "\" \"");
    assert_eq!(format_docstring("\"\"\"\"\"\"", "    ", 80), "\"\"\"\"\"\"");
}

#[test]
fn multiline_docstring_is_reindented() {
    let source = "\"\"\"\n        Does things.\n  \"\"\"";
    assert_eq!(
        format_docstring(source, "    ", 80),
        "\"\"\"\n    Does things.\n    \"\"\""
    );
}

#[test]
fn closing_quotes_move_to_their_own_line_when_too_long() {
    let long = format!("\"\"\"{}\"\"\"", "a".repeat(72));
    assert_eq!(
        format_docstring(&long, "    ", 80),
        format!("\"\"\"{}\n    \"\"\"", "a".repeat(72))
    );
    let short = format!("\"\"\"{}\"\"\"", "a".repeat(60));
    assert_eq!(format_docstring(&short, "    ", 80), short);
}
