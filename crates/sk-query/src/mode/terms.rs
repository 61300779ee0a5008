//! Multiple words, with quoted phrases and `-` negation.

use std::{iter::Peekable, str::CharIndices};

use crate::{
    ast::{Conjunction, Group, QueryNode},
    error::{ParseWarning, QueryError},
    lexer::{Operator, Token, decode_keys},
    mode::{Analysis, ParseMode},
};

/// Parses keys as a list of words combined with the configured conjunction.
///
/// Double quotes group words into a phrase and a leading `-` excludes the following word
/// or phrase. Operator keywords and parentheses have no special meaning. As in the complex
/// mode, words are joined with AND whenever one of them is excluded.
#[derive(Debug, Clone, Copy)]
pub struct TermsMode {
    /// Conjunction applied between words.
    conjunction: Conjunction,
}

impl TermsMode {
    /// Registry id of this mode.
    pub const ID: &'static str = "terms";

    /// Creates the mode with a default conjunction.
    pub fn new(conjunction: Conjunction) -> Self {
        Self { conjunction }
    }
}

impl ParseMode for TermsMode {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn label(&self) -> &'static str {
        "Multiple words"
    }

    fn description(&self) -> &'static str {
        "Words and \"quoted phrases\"; prefix with - to exclude"
    }

    fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    fn analyze(&self, keys: &[u8]) -> Result<Analysis, QueryError> {
        let input = decode_keys(keys)?;
        let mut scanner = Scanner::new(input);
        let mut tokens = Vec::new();
        let mut children = Vec::new();

        while let Some((negated, token)) = scanner.next_item() {
            let node = QueryNode::Keys(token.value().to_string());
            if negated {
                tokens.push(Token::Operator(Operator::Not));
                children.push(Group::negated(node).into());
            } else {
                children.push(node);
            }
            tokens.push(token);
        }

        let query = if children.is_empty() {
            None
        } else if children.iter().any(QueryNode::is_negation) {
            Some(Group::new(Conjunction::And, children))
        } else {
            Some(Group::new(self.conjunction, children))
        };

        Ok(Analysis {
            tokens,
            query,
            warnings: scanner.warnings,
        })
    }
}

/// Splits keys into optionally negated words and phrases.
struct Scanner<'a> {
    /// The input being scanned.
    input: &'a str,
    /// Characters with their byte offsets.
    chars: Peekable<CharIndices<'a>>,
    /// Diagnostics collected while scanning.
    warnings: Vec<ParseWarning>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `input`.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            warnings: Vec::new(),
        }
    }

    /// Returns the next word or phrase and whether it was negated.
    ///
    /// A `-` in front of an unterminated quote negates the item after the quote.
    fn next_item(&mut self) -> Option<(bool, Token)> {
        let mut carried = false;
        loop {
            while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}

            let &(start, ch) = self.chars.peek()?;
            let dash = ch == '-' && self.negation_follows(start);
            if dash {
                self.chars.next();
            }
            let negated = carried || dash;

            let token = match self.chars.peek() {
                Some(&(quote, '"')) if !self.input[quote + 1..].contains('"') => {
                    self.chars.next();
                    self.warnings
                        .push(ParseWarning::UnterminatedQuote { position: quote });
                    carried = negated;
                    continue;
                }
                Some(&(quote, '"')) => self.phrase(quote),
                Some(_) => Some(self.word()),
                None => None,
            };

            match token {
                Some(token) => return Some((negated, token)),
                None => carried = false,
            }
        }
    }

    /// Returns true if the `-` at `offset` is followed by something it can negate.
    fn negation_follows(&self, offset: usize) -> bool {
        self.input[offset + 1..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && c != '-')
    }

    /// Reads a word up to whitespace or a quote.
    fn word(&mut self) -> Token {
        let mut word = String::new();
        while let Some((_, ch)) = self.chars.next_if(|&(_, c)| !c.is_whitespace() && c != '"') {
            word.push(ch);
        }
        Token::Term(word)
    }

    /// Reads a quoted phrase starting at the quote at `offset`.
    ///
    /// Returns None for an empty phrase or a quote with no closing partner.
    fn phrase(&mut self, offset: usize) -> Option<Token> {
        self.chars.next(); // consume opening quote
        let rest = &self.input[offset + 1..];
        let len = rest.find('"')?;

        let content = &rest[..len];
        while self.chars.next_if(|&(i, _)| i <= offset + 1 + len).is_some() {}

        let content = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            None
        } else {
            Some(Token::Phrase(content))
        }
    }
}
