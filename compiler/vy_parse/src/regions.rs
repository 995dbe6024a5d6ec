//! `# fmt: off` / `# fmt: on` regions.
//!
//! Only standalone comments outside brackets open or close a region. A
//! region without a closing comment runs to the end of the file. Both
//! marker comments belong to the region.
//!
//! Markers are found in the normalized source, but the region text is cut
//! from the raw input so trailing whitespace inside a region survives.
//! Normalization never adds or removes a line, so line numbers agree.

use vy_ir::{TokenKind, VerbatimRegion};
use vy_lexer::{Token, TokenFlags};

fn marker(text: &str) -> Option<&str> {
    let body = text.strip_prefix('#')?.trim();
    let rest = body.strip_prefix("fmt:")?;
    Some(rest.trim())
}

pub(crate) fn is_fmt_off(text: &str) -> bool {
    marker(text) == Some("off")
}

pub(crate) fn is_fmt_on(text: &str) -> bool {
    marker(text) == Some("on")
}

/// Collect the regions marked in `tokens`, in source order.
///
/// `tokens` were lexed from `source`, the normalized form of `raw`.
pub(crate) fn verbatim_regions(raw: &str, source: &str, tokens: &[Token]) -> Vec<VerbatimRegion> {
    let line_count = u32::try_from(source.lines().count()).unwrap_or(u32::MAX);
    let mut regions = Vec::new();
    let mut open: Option<u32> = None;

    for token in tokens {
        if token.kind != TokenKind::StandaloneComment
            || token.flags.contains(TokenFlags::IN_BRACKETS)
        {
            continue;
        }
        let text = token.text(source);
        match open {
            None if is_fmt_off(text) => open = Some(token.line),
            Some(start) if is_fmt_on(text) => {
                regions.push(region(raw, start, token.line));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        regions.push(region(raw, start, line_count.max(start)));
    }
    regions
}

/// Lines `start_line..=end_line` of `raw`, exactly as written apart from
/// a final newline added to the last line when the input lacks one.
fn region(raw: &str, start_line: u32, end_line: u32) -> VerbatimRegion {
    let mut text = String::new();
    for line in raw
        .split_inclusive('\n')
        .skip(start_line.saturating_sub(1) as usize)
        .take((end_line - start_line + 1) as usize)
    {
        text.push_str(line.strip_suffix('\n').unwrap_or(line));
        text.push('\n');
    }
    VerbatimRegion {
        start_line,
        end_line,
        text,
    }
}
