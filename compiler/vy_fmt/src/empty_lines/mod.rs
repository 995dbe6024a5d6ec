//! Blank lines between logical lines.
//!
//! Declarations at module level are separated by two blank lines, nested
//! ones by one. Flow control and version pragmas ask for a blank line after
//! themselves, and a run of imports is set off from the code that follows.
//! Everywhere else the blank lines of the source are kept, up to two.

use tracing::trace;
use vy_ir::Tree;

use crate::line::Line;

/// Most blank lines kept from the source in a row.
const MAX_BLANK_LINES: usize = 2;

/// What the tracker remembers about the previous line.
#[derive(Copy, Clone, Debug)]
struct Previous {
    depth: usize,
    is_decorator: bool,
    is_def: bool,
    is_import: bool,
    is_comment: bool,
}

impl Previous {
    fn of(tree: &Tree, line: &Line) -> Self {
        Previous {
            depth: line.depth,
            is_decorator: line.is_decorator(),
            is_def: line.is_def(tree),
            is_import: line.is_import(tree),
            is_comment: line.is_comment(),
        }
    }
}

/// Decides how many blank lines go before and after each line.
///
/// Works on lines before they are split, in output order.
#[derive(Debug, Default)]
pub struct EmptyLineTracker {
    previous: Option<Previous>,
    previous_after: usize,
    /// Depths of the declarations that are still open.
    previous_defs: Vec<usize>,
}

impl EmptyLineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank lines before and after `line`.
    ///
    /// Consumes the blank lines recorded in the prefix of the first leaf.
    /// The blank lines the previous line already asked for after itself
    /// count towards `before`.
    pub fn maybe_empty_lines(&mut self, tree: &Tree, line: &mut Line) -> (usize, usize) {
        let (before, after) = self.compute(tree, line);
        let before = if self.previous.is_none() {
            0
        } else {
            before.saturating_sub(self.previous_after)
        };
        trace!(before, after, depth = line.depth, "empty lines");
        self.previous_after = after;
        self.previous = Some(Previous::of(tree, line));
        (before, after)
    }

    fn compute(&mut self, tree: &Tree, line: &mut Line) -> (usize, usize) {
        let mut before = match line.leaves.first_mut() {
            Some(first) => {
                let count = first.prefix.matches('\n').count();
                first.prefix.clear();
                count.min(MAX_BLANK_LINES)
            }
            None => 0,
        };

        let depth = line.depth;
        while self.previous_defs.last().is_some_and(|&top| top >= depth) {
            self.previous_defs.pop();
            let baseline: usize = if depth > 0 { 1 } else { 2 };
            before = baseline.saturating_sub(self.previous_after);
        }

        let is_decorator = line.is_decorator();
        if is_decorator || line.is_def(tree) {
            return self.before_declaration(line, is_decorator, before);
        }
        if line.is_flow_control() {
            return (before, 1);
        }
        if line.is_pragma() {
            return (0, 1);
        }
        if let Some(previous) = self.previous {
            if previous.is_import && !line.is_import(tree) && previous.depth == depth {
                return (before.max(1), 0);
            }
        }
        (before, 0)
    }

    fn before_declaration(
        &mut self,
        line: &Line,
        is_decorator: bool,
        before: usize,
    ) -> (usize, usize) {
        if !is_decorator {
            self.previous_defs.push(line.depth);
        }
        let Some(previous) = self.previous else {
            return (0, 0);
        };
        if previous.is_decorator {
            return (0, 0);
        }
        if previous.depth < line.depth && previous.is_def {
            return (0, 0);
        }
        if previous.is_comment && previous.depth == line.depth && before == 0 {
            return (0, 0);
        }
        let newlines = if line.depth > 0 { 1 } else { 2 };
        (newlines, 0)
    }
}

#[cfg(test)]
mod tests;
