//! String literal normalization.
//!
//! Quotes are normalized to double quotes unless that needs more escapes.
//! Docstrings are also re-indented (PEP 257) and padded so their closing
//! quotes can never be escaped or merged with the text.

use std::sync::LazyLock;

use regex::Regex;

/// Compile a pattern known at compile time.
#[expect(clippy::expect_used, reason = "patterns are fixed literals")]
pub(crate) fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern is a valid regex")
}

/// Patterns used to move a string from `orig` quotes to `new` quotes.
struct QuotePatterns {
    escaped_new: Regex,
    escaped_orig: Regex,
    unescaped_new: Regex,
}

impl QuotePatterns {
    fn new(orig: &str, new: &str) -> Self {
        QuotePatterns {
            escaped_new: literal_regex(&format!(r"([^\\]|^)\\((?:\\\\)*){new}")),
            escaped_orig: literal_regex(&format!(r"([^\\]|^)\\((?:\\\\)*){orig}")),
            unescaped_new: literal_regex(&format!(r"(([^\\]|^)(\\\\)*){new}")),
        }
    }
}

static FROM_TRIPLE_SINGLE: LazyLock<QuotePatterns> =
    LazyLock::new(|| QuotePatterns::new("'''", "\"\"\""));
static FROM_DOUBLE: LazyLock<QuotePatterns> = LazyLock::new(|| QuotePatterns::new("\"", "'"));
static FROM_SINGLE: LazyLock<QuotePatterns> = LazyLock::new(|| QuotePatterns::new("'", "\""));

/// Replace twice so overlapping matches are caught too.
fn sub_twice(regex: &Regex, replacement: &str, original: &str) -> String {
    let once = regex.replace_all(original, replacement);
    regex.replace_all(&once, replacement).into_owned()
}

/// Length of the literal prefix (`b`, `x`, `r`, ...) of a string token.
fn prefix_len(s: &str) -> usize {
    s.len() - s.trim_start_matches(|c: char| c.is_ascii_alphabetic()).len()
}

fn has_triple_quotes(s: &str) -> bool {
    let value = &s[prefix_len(s)..];
    value.starts_with("\"\"\"") || value.starts_with("'''")
}

/// True for a triple-quoted string that spans several lines.
pub fn is_multiline_string(s: &str) -> bool {
    has_triple_quotes(s) && s.contains('\n')
}

/// Prefer double quotes, but only if doing so does not add escapes.
///
/// Unnecessary escapes of the other quote character are removed on the way.
pub fn normalize_string_quotes(s: &str) -> String {
    let value = &s[prefix_len(s)..];
    let (orig_quote, new_quote, patterns) = if value.starts_with("\"\"\"") {
        return s.to_owned();
    } else if value.starts_with("'''") {
        ("'''", "\"\"\"", &*FROM_TRIPLE_SINGLE)
    } else if value.starts_with('"') {
        ("\"", "'", &*FROM_DOUBLE)
    } else {
        ("'", "\"", &*FROM_SINGLE)
    };

    let Some(first_quote_pos) = s.find(orig_quote) else {
        return s.to_owned();
    };
    let body_start = first_quote_pos + orig_quote.len();
    let Some(body_end) = s.len().checked_sub(orig_quote.len()).filter(|&end| end >= body_start) else {
        return s.to_owned();
    };
    let prefix = &s[..first_quote_pos];
    let mut original = s.to_owned();
    let mut body = s[body_start..body_end].to_owned();

    let new_body = sub_twice(&patterns.escaped_new, &format!("${{1}}${{2}}{new_quote}"), &body);
    if body != new_body {
        body.clone_from(&new_body);
        original = format!("{prefix}{orig_quote}{body}{orig_quote}");
    }
    let new_body = sub_twice(&patterns.escaped_orig, &format!("${{1}}${{2}}{orig_quote}"), &new_body);
    let mut new_body = sub_twice(&patterns.unescaped_new, &format!("${{1}}\\{new_quote}"), &new_body);

    if new_quote == "\"\"\"" && new_body.ends_with('"') {
        new_body.pop();
        new_body.push_str("\\\"");
    }
    let orig_escape_count = body.matches('\\').count();
    let new_escape_count = new_body.matches('\\').count();
    if new_escape_count > orig_escape_count {
        return original;
    }
    if new_escape_count == orig_escape_count && orig_quote == "\"" {
        return original;
    }
    format!("{prefix}{new_quote}{new_body}{new_quote}")
}

/// Expand tabs in the leading whitespace of `line`, if it has any.
fn expand_leading_tabs(line: &str) -> String {
    let content_start = line.len() - line.trim_start().len();
    let leading = &line[..content_start];
    if !leading.contains('\t') || content_start == line.len() {
        return line.to_owned();
    }
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in leading.chars() {
        if c == '\t' {
            let spaces = 8 - column % 8;
            out.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out.push_str(&line[content_start..]);
    out
}

/// Strip the common indentation of every line but the first and indent
/// them with `prefix` instead (PEP 257 docstring trimming).
pub fn fix_docstring(docstring: &str, prefix: &str) -> String {
    if docstring.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = docstring.lines().map(expand_leading_tabs).collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let stripped = line.trim_start();
            (!stripped.is_empty()).then(|| line.len() - stripped.len())
        })
        .min();

    let mut trimmed = vec![lines.first().map_or("", |line| line.trim()).to_owned()];
    if let Some(indent) = indent {
        let last_line_idx = lines.len().saturating_sub(2);
        for (i, line) in lines.iter().skip(1).enumerate() {
            let stripped_line = line.get(indent..).unwrap_or_else(|| line.trim_start()).trim_end();
            if !stripped_line.is_empty() || i == last_line_idx {
                trimmed.push(format!("{prefix}{stripped_line}"));
            } else {
                trimmed.push(String::new());
            }
        }
    }
    trimmed.join("\n")
}

/// Render a docstring for a body indented with `indent`.
///
/// The closing quotes of a triple-quoted docstring move to their own line
/// when keeping them on the last line would exceed `max_width`.
pub fn format_docstring(value: &str, indent: &str, max_width: usize) -> String {
    let is_multiline = is_multiline_string(value);
    let normalized = normalize_string_quotes(value);
    let (prefix, docstring) = normalized.split_at(prefix_len(&normalized));

    let Some(quote_char) = docstring.chars().next() else {
        return normalized;
    };
    let quote_len = if docstring
        .get(1..)
        .is_some_and(|rest| rest.starts_with(quote_char))
    {
        3
    } else {
        1
    };
    let inner = docstring
        .get(quote_len..docstring.len().saturating_sub(quote_len))
        .unwrap_or("");
    let started_empty = inner.is_empty();

    let mut text = if is_multiline {
        fix_docstring(inner, indent)
    } else {
        inner.trim().to_owned()
    };

    if !text.is_empty() {
        if text.starts_with(quote_char) {
            text.insert(0, ' ');
        }
        if text.ends_with(quote_char) {
            text.push(' ');
        }
        let backslashes = text.len() - text.trim_end_matches('\\').len();
        if backslashes % 2 == 1 {
            text.push(' ');
        }
    } else if !started_empty {
        text.push(' ');
    }

    let quote = quote_char.to_string().repeat(quote_len);
    if quote_len == 3 {
        let lines: Vec<&str> = text.lines().collect();
        let mut last_line_length = lines.last().map_or(0, |line| line.chars().count());
        if lines.len() == 1 {
            last_line_length += indent.len() + quote_len;
        }
        if last_line_length + quote_len > max_width {
            return format!("{prefix}{quote}{text}\n{indent}{quote}");
        }
    }
    format!("{prefix}{quote}{text}{quote}")
}

#[cfg(test)]
mod tests;
