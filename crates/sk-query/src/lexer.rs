//! Search-keys lexer (tokenizer).
//!
//! Converts raw keys into a stream of tokens for the parser. The lexer never fails on
//! well-formed UTF-8: malformed constructs degrade to ordinary terms and are reported as
//! [`ParseWarning`]s.

use std::{fmt, iter::Peekable, str, str::Chars};

use crate::error::{ParseWarning, QueryError};

/// A boolean operator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `NOT`
    Not,
}

impl Operator {
    /// Returns the operator for an exact, uppercase keyword.
    ///
    /// Lowercase or mixed-case spellings are ordinary terms.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Returns the keyword spelling of the operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A token in the search-keys language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word.
    Term(String),

    /// A quoted phrase (the quotes are stripped, content preserved).
    Phrase(String),

    /// One of the AND, OR or NOT keywords.
    Operator(Operator),

    /// Left parenthesis.
    OpenParen,

    /// Right parenthesis.
    CloseParen,
}

impl Token {
    /// Returns the textual value carried by the token.
    pub fn value(&self) -> &str {
        match self {
            Self::Term(value) | Self::Phrase(value) => value,
            Self::Operator(op) => op.keyword(),
            Self::OpenParen => "(",
            Self::CloseParen => ")",
        }
    }

    /// Returns a short name for the kind of token.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Term(_) => "term",
            Self::Phrase(_) => "phrase",
            Self::Operator(_) => "operator",
            Self::OpenParen => "open",
            Self::CloseParen => "close",
        }
    }
}

/// Formats the token as it would be written in keys.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phrase(value) => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            other => f.write_str(other.value()),
        }
    }
}

/// Tokenizes a keys string.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
    /// Diagnostics collected while scanning.
    warnings: Vec<ParseWarning>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
            warnings: Vec::new(),
        }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> (Vec<Token>, Vec<ParseWarning>) {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        (tokens, self.warnings)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();

            let &ch = self.chars.peek()?;

            match ch {
                '"' => {
                    if let Some(token) = self.read_phrase() {
                        return Some(token);
                    }
                }
                '(' => {
                    self.advance();
                    return Some(Token::OpenParen);
                }
                ')' => {
                    self.advance();
                    return Some(Token::CloseParen);
                }
                _ => return Some(self.read_term_or_operator()),
            }
        }
    }

    /// Reads a quoted phrase.
    ///
    /// Returns None for an empty phrase. An unterminated quote rewinds to just after the
    /// opening `"` and yields that quote as a literal term.
    fn read_phrase(&mut self) -> Option<Token> {
        let start_pos = self.position;
        self.advance(); // consume opening quote

        let resume_chars = self.chars.clone();
        let resume_pos = self.position;
        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    if content.trim().is_empty() {
                        return None;
                    }
                    return Some(Token::Phrase(content));
                }
                Some(&'\\') => {
                    self.advance();
                    if self.chars.peek() == Some(&'"') {
                        self.advance();
                        content.push('"');
                    } else {
                        content.push('\\');
                    }
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => {
                    self.chars = resume_chars;
                    self.position = resume_pos;
                    self.warnings
                        .push(ParseWarning::UnterminatedQuote { position: start_pos });
                    return Some(Token::Term("\"".into()));
                }
            }
        }
    }

    /// Reads a term or operator keyword.
    fn read_term_or_operator(&mut self) -> Token {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if is_term_boundary(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        match Operator::from_keyword(&word) {
            Some(op) => Token::Operator(op),
            None => Token::Term(word),
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Returns true if the character ends a bare term.
fn is_term_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"'
}

/// Validates raw keys as UTF-8.
pub fn decode_keys(keys: &[u8]) -> Result<&str, QueryError> {
    str::from_utf8(keys).map_err(|e| QueryError::InvalidUtf8 {
        position: e.valid_up_to(),
    })
}

/// Tokenizes a keys string, returning the tokens and any diagnostics.
pub fn tokenize_with_warnings(input: &str) -> (Vec<Token>, Vec<ParseWarning>) {
    Lexer::new(input).tokenize()
}

/// Convenience function to tokenize a keys string.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_with_warnings(input).0
}

/// Tokenizes raw keys, failing if they are not well-formed UTF-8.
pub fn tokenize_bytes(keys: &[u8]) -> Result<Vec<Token>, QueryError> {
    decode_keys(keys).map(tokenize)
}
