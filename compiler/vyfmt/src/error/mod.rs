//! Per-file failures.
//!
//! A failing file is reported and never written. Parse failures carry a
//! rendered source snippet pointing at the offending token.

use std::io::{self, IsTerminal};
use std::ops::Range;
use std::path::Path;

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;
use vy_fmt::FormatError;
use vy_parse::ParseError;

/// Why a file could not be formatted.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid path")]
    NotFound,

    #[error("Unable to parse input file, are you sure the Vyper code is valid?")]
    Parse {
        error: ParseError,
        /// Rendered diagnostic.
        report: String,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    /// The formatter produced text that does not parse.
    #[error("Formatting produced invalid code: {0}")]
    InvalidOutput(ParseError),

    /// Safe mode found a different syntax tree after formatting.
    #[error("Formatting changed the AST, aborting")]
    AstChanged,
}

impl FileError {
    /// A parse failure of `source`, read from `path`.
    pub fn parse(path: &Path, source: &str, error: ParseError) -> Self {
        let report = render_parse_error(path, source, &error, use_colors());
        FileError::Parse { error, report }
    }

    /// Extra text printed below the one-line message.
    pub fn details(&self) -> Option<&str> {
        match self {
            FileError::Parse { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Check if stderr is a terminal (for color output).
fn use_colors() -> bool {
    io::stderr().is_terminal()
}

/// Character range of the error span; the diagnostic renderer counts
/// characters, not bytes.
fn char_range(source: &str, error: &ParseError) -> Range<usize> {
    let chars_before = |offset: usize| {
        let offset = offset.min(source.len());
        source
            .get(..offset)
            .map_or(0, |prefix| prefix.chars().count())
    };
    let start = chars_before(error.span.start as usize);
    let end = chars_before(error.span.end as usize).max(start + 1);
    start..end
}

/// Render `error` as an annotated snippet of `source`.
pub fn render_parse_error(path: &Path, source: &str, error: &ParseError, color: bool) -> String {
    let name = path.display().to_string();
    let range = char_range(source, error);

    let mut out = Vec::new();
    let written = Report::<(String, Range<usize>)>::build(
        ReportKind::Error,
        name.clone(),
        range.start,
    )
    .with_config(Config::default().with_color(color))
    .with_message(&error.message)
    .with_label(Label::new((name.clone(), range)).with_message("here"))
    .finish()
    .write((name, Source::from(source.to_owned())), &mut out);

    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("{}: {error}\n", path.display()),
    }
}
