//! Error and diagnostic types for search-keys parsing.
//!
//! Hard failures are reported as [`QueryError`]. Recoverable oddities in the input (an
//! unterminated quote, a stray parenthesis) never fail a parse; they are collected as
//! [`ParseWarning`]s so tooling can explain what the parser tolerated.

use std::fmt;

use thiserror::Error;

use crate::lexer::Operator;

/// Errors that can occur while decoding keys or selecting a parse mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The raw keys were not well-formed UTF-8.
    #[error("keys are not valid UTF-8 (invalid sequence at byte {position})")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        position: usize,
    },

    /// No parse mode is registered under the requested id.
    #[error("unknown parse mode: {id}")]
    UnknownMode {
        /// The requested mode id.
        id: String,
    },

    /// A conjunction string was neither AND nor OR.
    #[error("invalid conjunction '{value}' (expected AND or OR)")]
    InvalidConjunction {
        /// The rejected value.
        value: String,
    },
}

impl QueryError {
    /// Returns a suggestion for resolving the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUtf8 { .. } => Some("Re-encode the input as UTF-8 before parsing"),
            Self::UnknownMode { .. } => Some("Run 'sk modes' to list the available parse modes"),
            Self::InvalidConjunction { .. } => Some("Use either AND or OR"),
        }
    }
}

/// A non-fatal observation made while tokenizing or parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A `"` had no closing partner and was kept as a literal term.
    UnterminatedQuote {
        /// Byte offset of the quote in the input.
        position: usize,
    },
    /// A group was still open when the input ended.
    UnclosedGroup,
    /// A `)` with no matching `(` was skipped.
    UnmatchedCloseParen {
        /// Token index of the parenthesis.
        token: usize,
    },
    /// An operator was missing an operand and was skipped.
    DanglingOperator {
        /// The skipped operator.
        operator: Operator,
        /// Token index of the operator.
        token: usize,
    },
    /// Groups or negations nested past the depth limit; the excess was skipped.
    NestingTooDeep {
        /// Token index of the first skipped token.
        token: usize,
        /// The nesting limit in effect.
        limit: usize,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { position } => {
                write!(f, "unterminated quote at byte {position} treated as a term")
            }
            Self::UnclosedGroup => write!(f, "missing closing parenthesis at end of input"),
            Self::UnmatchedCloseParen { token } => {
                write!(f, "unmatched closing parenthesis at token {token} ignored")
            }
            Self::DanglingOperator { operator, token } => {
                write!(f, "operator {operator} at token {token} has no operand, ignored")
            }
            Self::NestingTooDeep { token, limit } => write!(
                f,
                "nesting deeper than {limit} levels at token {token} ignored"
            ),
        }
    }
}
