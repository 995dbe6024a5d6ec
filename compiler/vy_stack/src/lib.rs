//! Stack growth for recursive descent.
//!
//! The parser recurses once per nesting level of an expression and the line
//! splitter once per bracket pair it opens. Pathological inputs (a few
//! thousand nested parentheses) would exhaust the main thread's stack, so both
//! run their recursive step through [`ensure_sufficient_stack`].
//!
//! On native targets the closure runs on a freshly allocated segment when
//! less than [`RED_ZONE`] bytes remain. On `wasm32` it is called directly.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
