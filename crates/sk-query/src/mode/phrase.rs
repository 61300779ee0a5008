//! The whole input as one phrase.

use crate::{
    ast::{Conjunction, Group, QueryNode},
    error::QueryError,
    lexer::{Token, decode_keys},
    mode::{Analysis, ParseMode},
};

/// Treats the entire input as a single phrase.
#[derive(Debug, Clone, Copy)]
pub struct PhraseMode {
    /// Conjunction of the wrapping group.
    conjunction: Conjunction,
}

impl PhraseMode {
    /// Registry id of this mode.
    pub const ID: &'static str = "phrase";

    /// Creates the mode with a default conjunction.
    pub fn new(conjunction: Conjunction) -> Self {
        Self { conjunction }
    }
}

impl ParseMode for PhraseMode {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn label(&self) -> &'static str {
        "Single phrase"
    }

    fn description(&self) -> &'static str {
        "The entire input is searched as one phrase"
    }

    fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    fn analyze(&self, keys: &[u8]) -> Result<Analysis, QueryError> {
        let phrase = decode_keys(keys)?.trim();
        if phrase.is_empty() {
            return Ok(Analysis::default());
        }

        Ok(Analysis {
            tokens: vec![Token::Phrase(phrase.to_string())],
            query: Some(Group::new(
                self.conjunction,
                vec![QueryNode::Keys(phrase.to_string())],
            )),
            warnings: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_input_is_one_key() {
        let mode = PhraseMode::new(Conjunction::Or);
        assert_eq!(
            mode.parse_input(b"  foo AND \"bar\"  "),
            Some(Group::new(
                Conjunction::Or,
                vec![QueryNode::Keys("foo AND \"bar\"".into())]
            ))
        );
    }

    #[test]
    fn blank_input_is_no_query() {
        assert_eq!(PhraseMode::new(Conjunction::And).parse_input(b" \n"), None);
    }

    #[test]
    fn malformed_utf8_is_no_query() {
        assert_eq!(PhraseMode::new(Conjunction::And).parse_input(b"\x80"), None);
    }
}
