//! Output emitter.
//!
//! Where formatted lines go. [`format_tree`](crate::format_tree) writes into
//! a [`StringEmitter`]; other destinations implement [`Emitter`].

use crate::line::Line;

/// Receives formatted output, one physical line or blank line at a time.
pub trait Emitter {
    /// Emit a text fragment as is.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit `count` empty lines.
    fn emit_blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.emit_newline();
        }
    }

    /// Emit a physical line with its indentation, trailing comments and
    /// newline.
    fn emit_line(&mut self, line: &Line) {
        self.emit(&line.to_string());
    }
}

/// String-based emitter for in-memory formatting.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }
}

#[cfg(test)]
mod tests;
