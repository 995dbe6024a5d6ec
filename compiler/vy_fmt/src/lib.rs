//! Vyper Formatter
//!
//! Deterministic, line-length aware formatter for Vyper source. Every
//! comment and the program's syntax tree survive formatting, and
//! formatting formatted output changes nothing.
//!
//! # Architecture
//!
//! Formatting is a single consuming pass over a parsed [`Tree`]:
//!
//! 1. **Line generation** ([`linegen`]): the tree is walked once and cut
//!    into logical [`Line`]s, normalizing strings, docstrings, comments and
//!    optional parentheses on the way
//! 2. **Blank lines** ([`empty_lines`]): decides the blank lines around
//!    every logical line
//! 3. **Splitting** ([`split`]): a line that does not fit is split into
//!    physical lines, recursively, using the bracket and delimiter data of
//!    [`brackets`]
//! 4. **Emission** ([`emitter`]): physical lines and blank lines are
//!    written out
//!
//! Core principle: a line stays as it is if it fits in the maximum width;
//! otherwise it is split at the loosest-binding point that works.
//!
//! Source between `# fmt: off` and `# fmt: on` comments is copied through
//! unchanged.
//!
//! # Modules
//!
//! - [`line`]: the logical line and its rendering
//! - [`whitespace`]: the space that goes before each leaf
//! - [`strings`]: string and docstring normalization
//! - [`comments`]: comment normalization
//! - [`config`]: the maximum line width

pub mod brackets;
pub mod comments;
pub mod config;
pub mod emitter;
pub mod empty_lines;
pub mod line;
pub mod linegen;
pub mod split;
pub mod strings;
pub mod whitespace;

use thiserror::Error;
use tracing::debug;
use vy_ir::Tree;
use vy_parse::{ParseError, Parser};

pub use brackets::BracketMatchError;
pub use config::{FormatConfig, DEFAULT_MAX_WIDTH, INDENT_WIDTH};
pub use emitter::{Emitter, StringEmitter};
pub use empty_lines::EmptyLineTracker;
pub use line::Line;
pub use linegen::LineGenerator;
pub use split::split_line;

/// Why a file could not be formatted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    BracketMatch(#[from] BracketMatchError),
}

/// Parse and format `source`.
///
/// # Errors
///
/// Returns an error if `source` does not parse or its brackets do not
/// match.
///
/// # Example
///
/// ```
/// use vy_fmt::{format_source, FormatConfig};
/// use vy_parse::Parser;
///
/// let formatted = format_source(&Parser::new(), "x=[1,2]", &FormatConfig::default());
/// assert_eq!(formatted.ok().as_deref(), Some("x = [1, 2]\n"));
/// ```
pub fn format_source(
    parser: &Parser,
    source: &str,
    config: &FormatConfig,
) -> Result<String, FormatError> {
    let tree = parser.parse(source)?;
    format_tree(tree, config)
}

/// Format a parsed tree.
///
/// The tree is consumed: line generation normalizes it in place.
///
/// # Errors
///
/// Returns an error if the brackets of a line do not match.
pub fn format_tree(tree: Tree, config: &FormatConfig) -> Result<String, FormatError> {
    let mut emitter = StringEmitter::with_capacity(tree.len() * 4);
    format_tree_into(tree, config, &mut emitter)?;
    Ok(emitter.output())
}

/// Format a parsed tree into `emitter`.
///
/// # Errors
///
/// Returns an error if the brackets of a line do not match. Output written
/// before the error stays in `emitter`.
pub fn format_tree_into(
    tree: Tree,
    config: &FormatConfig,
    emitter: &mut impl Emitter,
) -> Result<(), FormatError> {
    let mut generator = LineGenerator::new(tree, config.max_width);
    let mut tracker = EmptyLineTracker::new();
    let mut after = 0;
    let mut verbatim_start: Option<u32> = None;

    while let Some(line) = generator.next_line() {
        let mut line = line?;
        let tree = generator.tree();
        let (before, line_after) = tracker.maybe_empty_lines(tree, &mut line);

        let region = first_source_line(&line).and_then(|start| tree.region_at(start));
        if let Some(region) = region {
            if verbatim_start != Some(region.start_line) {
                debug!(
                    start = region.start_line,
                    end = region.end_line,
                    "emitting fmt: off region"
                );
                emitter.emit_blank_lines(after + before);
                emitter.emit(&region.text);
                verbatim_start = Some(region.start_line);
            }
            after = 0;
            continue;
        }

        emitter.emit_blank_lines(after + before);
        after = line_after;
        for physical in split_line(tree, line, config.max_width, false) {
            emitter.emit_line(&physical);
        }
    }
    Ok(())
}

/// Source line of the first leaf that came from the source.
fn first_source_line(line: &Line) -> Option<u32> {
    line.leaves.iter().map(|leaf| leaf.line).find(|&line| line > 0)
}
