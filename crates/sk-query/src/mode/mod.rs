//! Parse modes and the parse-mode registry.
//!
//! A parse mode decides how free-text keys are interpreted. Every mode turns raw keys into
//! an optional [`Group`] that a search backend can consume directly; `None` means the input
//! holds no usable query.

mod complex;
mod phrase;
mod terms;

use std::collections::BTreeMap;

pub use complex::ComplexMode;
pub use phrase::PhraseMode;
pub use terms::TermsMode;

use crate::{
    ast::{Conjunction, Group, QueryNode},
    error::{ParseWarning, QueryError},
    lexer::Token,
};

/// The result of analyzing keys with a parse mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    /// Tokens produced while scanning (empty for modes that do not tokenize).
    pub tokens: Vec<Token>,
    /// The parsed query, if any.
    pub query: Option<Group>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<ParseWarning>,
}

/// Interprets free-text keys as a structured query.
pub trait ParseMode: Send + Sync {
    /// Stable identifier used in configuration and on the command line.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn label(&self) -> &'static str;

    /// One-line description of how keys are interpreted.
    fn description(&self) -> &'static str;

    /// The conjunction used when keys are combined without an explicit operator.
    fn conjunction(&self) -> Conjunction;

    /// Analyzes raw keys, keeping tokens and diagnostics.
    ///
    /// Fails only if the keys are not valid UTF-8.
    fn analyze(&self, keys: &[u8]) -> Result<Analysis, QueryError>;

    /// Parses raw keys into a query.
    ///
    /// Returns `None` for empty input and for input that is not valid UTF-8.
    fn parse_input(&self, keys: &[u8]) -> Option<Group> {
        self.analyze(keys).ok().and_then(|analysis| analysis.query)
    }
}

/// Wraps a parse result so it is always a group.
///
/// A bare key becomes a single-child group using `conjunction`; an empty group is dropped.
pub fn into_group(node: Option<QueryNode>, conjunction: Conjunction) -> Option<Group> {
    match node? {
        QueryNode::Keys(keys) => Some(Group::new(conjunction, vec![QueryNode::Keys(keys)])),
        QueryNode::Group(group) if group.is_empty() => None,
        QueryNode::Group(group) => Some(group),
    }
}

/// Constructs a parse mode configured with a default conjunction.
pub type ModeFactory = fn(Conjunction) -> Box<dyn ParseMode>;

/// Maps parse mode ids to their factories.
#[derive(Clone)]
pub struct ParseModeRegistry {
    /// Registered factories, keyed by mode id.
    factories: BTreeMap<&'static str, ModeFactory>,
}

impl Default for ParseModeRegistry {
    /// Creates a registry holding the built-in modes.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(ComplexMode::ID, |c| Box::new(ComplexMode::new(c)));
        registry.register(TermsMode::ID, |c| Box::new(TermsMode::new(c)));
        registry.register(PhraseMode::ID, |c| Box::new(PhraseMode::new(c)));
        registry
    }
}

impl ParseModeRegistry {
    /// Creates a registry with no modes.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registers a factory, replacing any previous factory with the same id.
    pub fn register(&mut self, id: &'static str, factory: ModeFactory) {
        self.factories.insert(id, factory);
    }

    /// Returns true if a mode is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Returns all registered mode ids in sorted order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Instantiates the mode registered under `id`.
    pub fn create(
        &self,
        id: &str,
        conjunction: Conjunction,
    ) -> Result<Box<dyn ParseMode>, QueryError> {
        self.factories
            .get(id)
            .map(|factory| factory(conjunction))
            .ok_or_else(|| QueryError::UnknownMode { id: id.to_string() })
    }

    /// Instantiates every registered mode, in id order.
    pub fn create_all(&self, conjunction: Conjunction) -> Vec<Box<dyn ParseMode>> {
        self.factories
            .values()
            .map(|factory| factory(conjunction))
            .collect()
    }
}
