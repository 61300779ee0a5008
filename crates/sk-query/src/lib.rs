//! Search keys parsing for sk.
//!
//! This crate turns free-text search input into a query tree a search backend can consume:
//!
//! - **Terms**: `rust` - a bare word
//! - **Phrases**: `"error handling"` - quoted words searched together
//! - **AND / OR**: `rust OR golang` - explicit conjunctions (uppercase only)
//! - **NOT**: `NOT deprecated` - exclusion
//! - **Grouping**: `(a b) OR (c d)` - nesting
//!
//! Terms written next to each other are combined with a configurable default conjunction.
//! Parsing never fails on valid UTF-8; odd input degrades to a best-effort tree.
//!
//! # Example
//!
//! ```
//! use sk_query::{ComplexMode, Conjunction, ParseMode};
//!
//! let mode = ComplexMode::new(Conjunction::And);
//! let query = mode.parse_input(b"foo AND (bar OR \"baz qux\") NOT quux").unwrap();
//! assert_eq!(query.keys(), vec!["foo", "bar", "baz qux", "quux"]);
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod mode;
mod parser;

pub use ast::{Conjunction, Group, QueryNode};
pub use error::{ParseWarning, QueryError};
pub use lexer::{Operator, Token, decode_keys, tokenize, tokenize_bytes, tokenize_with_warnings};
pub use mode::{
    Analysis, ComplexMode, ModeFactory, ParseMode, ParseModeRegistry, PhraseMode, TermsMode,
    into_group,
};
pub use parser::{MAX_DEPTH, parse, parse_tokens, parse_tokens_with_warnings};

/// Parses raw keys as a boolean query with the given default conjunction.
///
/// Returns `None` when the keys are not valid UTF-8 or contain no usable query.
pub fn parse_input(keys: &[u8], conjunction: Conjunction) -> Option<Group> {
    ComplexMode::new(conjunction).parse_input(keys)
}
