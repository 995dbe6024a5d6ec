//! Parser tests.
//!
//! - `parser`: tree shapes for declarations, statements and expressions
//! - `comments`: where trailing and standalone comments land

mod comments;
