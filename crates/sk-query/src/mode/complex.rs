//! Boolean keys: AND, OR, NOT, parentheses and quoted phrases.

use crate::{
    ast::Conjunction,
    error::QueryError,
    lexer::{decode_keys, tokenize_with_warnings},
    mode::{Analysis, ParseMode, into_group},
    parser::parse_tokens_with_warnings,
};

/// Parses keys as a boolean query.
///
/// `foo AND (bar OR "baz qux") NOT quux` becomes a nested group tree. Terms with no
/// operator between them are combined with the configured conjunction.
#[derive(Debug, Clone, Copy)]
pub struct ComplexMode {
    /// Conjunction for implicitly combined terms.
    conjunction: Conjunction,
}

impl ComplexMode {
    /// Registry id of this mode.
    pub const ID: &'static str = "complex";

    /// Creates the mode with a default conjunction.
    pub fn new(conjunction: Conjunction) -> Self {
        Self { conjunction }
    }
}

impl ParseMode for ComplexMode {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn label(&self) -> &'static str {
        "Complex query"
    }

    fn description(&self) -> &'static str {
        "Boolean keys with AND, OR, NOT, parentheses and \"quoted phrases\""
    }

    fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    fn analyze(&self, keys: &[u8]) -> Result<Analysis, QueryError> {
        let input = decode_keys(keys)?;
        let (tokens, mut warnings) = tokenize_with_warnings(input);
        let (node, parse_warnings) = parse_tokens_with_warnings(tokens.clone(), self.conjunction);
        warnings.extend(parse_warnings);

        Ok(Analysis {
            tokens,
            query: into_group(node, self.conjunction),
            warnings,
        })
    }
}
