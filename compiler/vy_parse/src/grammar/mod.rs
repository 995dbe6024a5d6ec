//! Grammar Modules
//!
//! Each module extends `ParserState` with the productions for one area of
//! the language:
//!
//! - [`item`]: module-level declarations (functions, structs, events,
//!   interfaces, storage variables, imports)
//! - [`stmt`]: blocks and statements
//! - [`expr`]: expressions, also used for type annotations
//!
//! Productions build their node directly in the tree builder. Binary
//! operators use checkpoints: the left operand is parsed first and then
//! adopted by the operator node once the operator is seen.

mod expr;
mod item;
mod stmt;
