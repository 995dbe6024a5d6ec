//! Per-token layout flags.

use bitflags::bitflags;

bitflags! {
    /// Where a token sits relative to lines and brackets.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// First token on its physical line.
        const LINE_START = 1 << 0;
        /// Inside at least one pair of brackets.
        const IN_BRACKETS = 1 << 1;
        /// Synthesized by the layout pass (NEWLINE, INDENT, DEDENT).
        const SYNTHETIC = 1 << 2;
    }
}
