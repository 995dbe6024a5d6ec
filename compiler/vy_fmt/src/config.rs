//! Formatter configuration.
//!
//! The only knob is the maximum line width. Everything else is fixed.

/// Default maximum line width before splitting.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Configuration for the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Maximum rendered width of a physical line, indentation included.
    pub max_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified max width.
    pub fn with_max_width(max_width: usize) -> Self {
        Self { max_width }
    }
}

/// Indentation for `depth` levels.
#[inline]
pub(crate) fn indent(depth: usize) -> String {
    " ".repeat(INDENT_WIDTH * depth)
}
