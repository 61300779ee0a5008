//! Search-keys parser.
//!
//! Parses a token stream into a query tree using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! expression → term (("AND" | "OR") term | term)*
//! term       → "NOT" term | "(" expression ")" | TERM | PHRASE
//! ```
//!
//! # Combination
//!
//! There is no operator precedence. An expression is folded strictly left to right, so
//! `a OR b AND c` reads as `(a OR b) AND c`. Repeating the same explicit operator extends
//! the current group instead of nesting: `a AND b AND c` is one AND group.
//!
//! Adjacent terms with no operator between them form an implicit run combined with the
//! caller's default conjunction. A run containing a negation is always combined with AND.
//!
//! # Tolerance
//!
//! The parser never fails. A missing `)` closes the group at end of input, a stray `)` at
//! the top level is skipped, and operators without operands are dropped. Each of these is
//! recorded as a [`ParseWarning`].
//!
//! Groups and negations nest at most [`MAX_DEPTH`] levels deep. Beyond that, `(` and `NOT`
//! are skipped along with the `)` that closes each skipped `(`, and the terms they held are
//! folded into the innermost group that was kept.

use std::mem;

use crate::{
    ast::{Conjunction, Group, QueryNode},
    error::ParseWarning,
    lexer::{Operator, Token, tokenize_with_warnings},
};

/// Maximum nesting of groups and negations kept in a query tree.
pub const MAX_DEPTH: usize = 128;

/// Left-to-right accumulator for a single expression.
struct Fold {
    /// Conjunction used for implicit runs.
    default: Conjunction,
    /// Members of the current implicit run.
    ///
    /// The first member may be the result of an earlier explicit combination.
    run: Vec<QueryNode>,
    /// Conjunction of the explicit group held in `run[0]`, while it can still be extended.
    open: Option<Conjunction>,
}

impl Fold {
    /// Creates an empty fold.
    fn new(default: Conjunction) -> Self {
        Self {
            default,
            run: Vec::new(),
            open: None,
        }
    }

    /// Returns true if nothing has been folded yet.
    fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    /// Appends a node that follows the previous one with no operator in between.
    fn push_implicit(&mut self, node: QueryNode) {
        self.open = None;
        self.run.push(node);
    }

    /// Combines everything folded so far with `rhs` using an explicit conjunction.
    fn combine(&mut self, conjunction: Conjunction, rhs: QueryNode) {
        let open = self.open.take();
        let node = match self.reduce_run() {
            Some(QueryNode::Group(mut group)) if open == Some(conjunction) => {
                group.children.push(rhs);
                group
            }
            Some(lhs) => Group::new(conjunction, vec![lhs, rhs]),
            None => {
                self.run.push(rhs);
                return;
            }
        };
        self.run.push(node.into());
        self.open = Some(conjunction);
    }

    /// Collapses the implicit run into a single node.
    fn reduce_run(&mut self) -> Option<QueryNode> {
        let mut run = mem::take(&mut self.run);
        match run.len() {
            0 => None,
            1 => run.pop(),
            _ => {
                let conjunction = if run.iter().any(QueryNode::is_negation) {
                    Conjunction::And
                } else {
                    self.default
                };
                Some(Group::new(conjunction, run).into())
            }
        }
    }

    /// Finishes the fold.
    fn finish(mut self) -> Option<QueryNode> {
        self.reduce_run()
    }
}

/// Recursive descent parser for search keys.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
    /// Default conjunction for implicit runs.
    conjunction: Conjunction,
    /// Diagnostics collected while parsing.
    warnings: Vec<ParseWarning>,
    /// Open parentheses skipped past the depth limit and not yet closed.
    skipped_groups: usize,
    /// Whether the depth limit has already been reported.
    depth_reported: bool,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>, conjunction: Conjunction) -> Self {
        Self {
            tokens,
            position: 0,
            conjunction,
            warnings: Vec::new(),
            skipped_groups: 0,
            depth_reported: false,
        }
    }

    /// Parses the whole token stream.
    fn parse(mut self) -> (Option<QueryNode>, Vec<ParseWarning>) {
        let node = self.parse_expression(0);
        (node, self.warnings)
    }

    /// Parses: expression → term (("AND" | "OR") term | term)*
    ///
    /// Stops before a `)` when nested; at the top level a `)` is skipped.
    fn parse_expression(&mut self, depth: usize) -> Option<QueryNode> {
        let mut fold = Fold::new(self.conjunction);

        loop {
            match self.peek() {
                None => break,
                Some(Token::CloseParen) => {
                    if self.skipped_groups > 0 {
                        self.skipped_groups -= 1;
                        self.advance();
                        continue;
                    }
                    if depth > 0 {
                        break;
                    }
                    self.warnings.push(ParseWarning::UnmatchedCloseParen {
                        token: self.position,
                    });
                    self.advance();
                }
                Some(&Token::Operator(operator @ (Operator::And | Operator::Or))) => {
                    let token = self.position;
                    self.advance(); // consume AND / OR
                    let conjunction = match operator {
                        Operator::Or => Conjunction::Or,
                        _ => Conjunction::And,
                    };

                    match self.parse_term(depth) {
                        Some(rhs) if !fold.is_empty() => fold.combine(conjunction, rhs),
                        Some(rhs) => {
                            self.warnings
                                .push(ParseWarning::DanglingOperator { operator, token });
                            fold.push_implicit(rhs);
                        }
                        None => {
                            self.warnings
                                .push(ParseWarning::DanglingOperator { operator, token });
                        }
                    }
                }
                Some(_) => {
                    if let Some(term) = self.parse_term(depth) {
                        fold.push_implicit(term);
                    }
                }
            }
        }

        fold.finish()
    }

    /// Parses: term → "NOT" term | "(" expression ")" | TERM | PHRASE
    ///
    /// Returns None if the current token cannot start a term. At the depth limit, `(` and
    /// `NOT` are skipped first.
    fn parse_term(&mut self, depth: usize) -> Option<QueryNode> {
        if depth >= MAX_DEPTH {
            self.skip_nesting();
        }

        match self.peek() {
            Some(Token::Operator(Operator::Not)) => {
                let token = self.position;
                self.advance(); // consume NOT
                match self.parse_term(depth + 1) {
                    Some(inner) => Some(Group::negated(inner).into()),
                    None => {
                        self.warnings.push(ParseWarning::DanglingOperator {
                            operator: Operator::Not,
                            token,
                        });
                        None
                    }
                }
            }
            Some(Token::OpenParen) => {
                self.advance(); // consume (
                let inner = self.parse_expression(depth + 1);
                if matches!(self.peek(), Some(Token::CloseParen)) {
                    self.advance(); // consume )
                } else {
                    self.warnings.push(ParseWarning::UnclosedGroup);
                }
                inner
            }
            Some(Token::Term(value) | Token::Phrase(value)) => {
                let keys = value.clone();
                self.advance();
                Some(QueryNode::Keys(keys))
            }
            Some(Token::Operator(_) | Token::CloseParen) | None => None,
        }
    }

    /// Skips `(` and `NOT` tokens that would nest past [`MAX_DEPTH`].
    fn skip_nesting(&mut self) {
        loop {
            match self.peek() {
                Some(Token::OpenParen) => self.skipped_groups += 1,
                Some(Token::Operator(Operator::Not)) => {}
                _ => break,
            }
            if !self.depth_reported {
                self.depth_reported = true;
                self.warnings.push(ParseWarning::NestingTooDeep {
                    token: self.position,
                    limit: MAX_DEPTH,
                });
            }
            self.advance();
        }
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a token stream, returning the query and any diagnostics.
pub fn parse_tokens_with_warnings(
    tokens: Vec<Token>,
    conjunction: Conjunction,
) -> (Option<QueryNode>, Vec<ParseWarning>) {
    Parser::new(tokens, conjunction).parse()
}

/// Parses a token stream into a query tree.
///
/// Returns `None` when nothing parseable remains, `Some(QueryNode::Keys)` for a single bare
/// term or phrase, and `Some(QueryNode::Group)` otherwise.
pub fn parse_tokens(tokens: Vec<Token>, conjunction: Conjunction) -> Option<QueryNode> {
    parse_tokens_with_warnings(tokens, conjunction).0
}

/// Tokenizes and parses a keys string.
pub fn parse(input: &str, conjunction: Conjunction) -> Option<QueryNode> {
    let (tokens, _) = tokenize_with_warnings(input);
    parse_tokens(tokens, conjunction)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use proptest::prelude::*;

    use super::*;

    fn keys(s: &str) -> QueryNode {
        QueryNode::Keys(s.into())
    }

    fn and(children: Vec<QueryNode>) -> QueryNode {
        Group::new(Conjunction::And, children).into()
    }

    fn or(children: Vec<QueryNode>) -> QueryNode {
        Group::new(Conjunction::Or, children).into()
    }

    fn not(child: QueryNode) -> QueryNode {
        Group::negated(child).into()
    }

    fn parse_and(input: &str) -> Option<QueryNode> {
        parse(input, Conjunction::And)
    }

    fn parse_or(input: &str) -> Option<QueryNode> {
        parse(input, Conjunction::Or)
    }

    fn warnings(input: &str) -> Vec<ParseWarning> {
        let (tokens, mut warnings) = tokenize_with_warnings(input);
        warnings.extend(parse_tokens_with_warnings(tokens, Conjunction::And).1);
        warnings
    }

    #[test]
    fn empty_query() {
        assert_eq!(parse_and(""), None);
        assert_eq!(parse_and("   "), None);
    }

    #[test]
    fn single_term() {
        assert_eq!(parse_and("foo"), Some(keys("foo")));
    }

    #[test]
    fn single_phrase_is_bare_keys() {
        assert_eq!(parse_and("\"quoted phrase\""), Some(keys("quoted phrase")));
    }

    #[test]
    fn bare_words_use_default_conjunction() {
        assert_eq!(
            parse_and("foo bar baz"),
            Some(and(vec![keys("foo"), keys("bar"), keys("baz")]))
        );
        assert_eq!(
            parse_or("foo bar baz"),
            Some(or(vec![keys("foo"), keys("bar"), keys("baz")]))
        );
    }

    #[test]
    fn explicit_and() {
        assert_eq!(
            parse_or("foo AND bar"),
            Some(and(vec![keys("foo"), keys("bar")]))
        );
    }

    #[test]
    fn explicit_or() {
        assert_eq!(
            parse_and("foo OR bar"),
            Some(or(vec![keys("foo"), keys("bar")]))
        );
    }

    #[test]
    fn repeated_operator_extends_group() {
        assert_eq!(
            parse_and("a OR b OR c"),
            Some(or(vec![keys("a"), keys("b"), keys("c")]))
        );
    }

    #[test]
    fn mixed_operators_fold_left() {
        assert_eq!(
            parse_and("foo OR bar AND baz"),
            Some(and(vec![or(vec![keys("foo"), keys("bar")]), keys("baz")]))
        );
        assert_eq!(
            parse_and("foo AND bar OR baz"),
            Some(or(vec![and(vec![keys("foo"), keys("bar")]), keys("baz")]))
        );
    }

    #[test]
    fn implicit_run_before_operator() {
        assert_eq!(
            parse_or("a b AND c"),
            Some(and(vec![or(vec![keys("a"), keys("b")]), keys("c")]))
        );
    }

    #[test]
    fn implicit_run_after_operator() {
        assert_eq!(
            parse_or("a AND b c"),
            Some(or(vec![and(vec![keys("a"), keys("b")]), keys("c")]))
        );
    }

    #[test]
    fn grouped_or_inside_and() {
        assert_eq!(
            parse_and("(foo OR bar) AND baz"),
            Some(and(vec![or(vec![keys("foo"), keys("bar")]), keys("baz")]))
        );
    }

    #[test]
    fn parenthesized_group_is_not_flattened() {
        assert_eq!(
            parse_and("(a AND b) AND c"),
            Some(and(vec![and(vec![keys("a"), keys("b")]), keys("c")]))
        );
    }

    #[test]
    fn single_term_group_unwraps() {
        assert_eq!(parse_and("(foo)"), Some(keys("foo")));
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            parse_or("((a AND b) c)"),
            Some(or(vec![and(vec![keys("a"), keys("b")]), keys("c")]))
        );
    }

    #[test]
    fn simple_negation() {
        assert_eq!(parse_and("NOT foo"), Some(not(keys("foo"))));
    }

    #[test]
    fn double_negation() {
        assert_eq!(parse_and("NOT NOT foo"), Some(not(not(keys("foo")))));
    }

    #[test]
    fn negated_group() {
        assert_eq!(
            parse_and("NOT (a OR b)"),
            Some(not(or(vec![keys("a"), keys("b")])))
        );
    }

    #[test]
    fn negation_forces_implicit_and() {
        assert_eq!(
            parse_or("foo NOT bar"),
            Some(and(vec![keys("foo"), not(keys("bar"))]))
        );
        assert_eq!(
            parse_or("NOT foo bar baz"),
            Some(and(vec![not(keys("foo")), keys("bar"), keys("baz")]))
        );
    }

    #[test]
    fn negation_does_not_override_explicit_or() {
        assert_eq!(
            parse_and("foo OR NOT bar"),
            Some(or(vec![keys("foo"), not(keys("bar"))]))
        );
    }

    #[test]
    fn full_example() {
        assert_eq!(
            parse_and("foo AND (bar OR \"baz qux\") NOT quux"),
            Some(and(vec![
                and(vec![keys("foo"), or(vec![keys("bar"), keys("baz qux")])]),
                not(keys("quux")),
            ]))
        );
    }

    #[test]
    fn lowercase_operators_are_terms() {
        assert_eq!(
            parse_or("foo and bar"),
            Some(or(vec![keys("foo"), keys("and"), keys("bar")]))
        );
    }

    #[test]
    fn missing_close_paren_is_tolerated() {
        assert_eq!(
            parse_and("foo (bar OR baz"),
            Some(and(vec![keys("foo"), or(vec![keys("bar"), keys("baz")])]))
        );
        assert_eq!(warnings("foo (bar OR baz"), vec![ParseWarning::UnclosedGroup]);
    }

    #[test]
    fn stray_close_paren_is_skipped() {
        assert_eq!(
            parse_and("foo) bar"),
            Some(and(vec![keys("foo"), keys("bar")]))
        );
        assert_eq!(
            warnings("foo) bar"),
            vec![ParseWarning::UnmatchedCloseParen { token: 1 }]
        );
    }

    #[test]
    fn empty_group_contributes_nothing() {
        assert_eq!(parse_and("()"), None);
        assert_eq!(parse_and("foo () bar"), Some(and(vec![keys("foo"), keys("bar")])));
    }

    #[test]
    fn dangling_operators_are_dropped() {
        assert_eq!(parse_and("AND foo"), Some(keys("foo")));
        assert_eq!(parse_and("foo OR"), Some(keys("foo")));
        assert_eq!(parse_and("foo NOT"), Some(keys("foo")));
        assert_eq!(
            parse_and("foo AND AND bar"),
            Some(and(vec![keys("foo"), keys("bar")]))
        );
        assert_eq!(parse_and("AND OR NOT"), None);
    }

    #[test]
    fn dangling_operator_warnings() {
        assert_eq!(
            warnings("foo OR"),
            vec![ParseWarning::DanglingOperator {
                operator: Operator::Or,
                token: 1,
            }]
        );
        assert_eq!(
            warnings("NOT"),
            vec![ParseWarning::DanglingOperator {
                operator: Operator::Not,
                token: 0,
            }]
        );
    }

    #[test]
    fn unterminated_quote_is_a_term() {
        assert_eq!(
            parse_and("\"foo bar"),
            Some(and(vec![keys("\""), keys("foo"), keys("bar")]))
        );
    }

    #[test]
    fn parse_tokens_directly() {
        let tokens = vec![
            Token::Term("foo".into()),
            Token::Operator(Operator::Or),
            Token::Phrase("bar baz".into()),
        ];
        assert_eq!(
            parse_tokens(tokens, Conjunction::And),
            Some(or(vec![keys("foo"), keys("bar baz")]))
        );
    }

    #[test]
    fn performance_many_queries() {
        let queries = [
            "foo",
            "foo bar baz",
            "\"error handling\"",
            "NOT deprecated",
            "a OR b OR c",
            "(a b) OR (c d)",
            "foo AND (bar OR \"baz qux\") NOT quux",
            "((a OR b) c) OR ((d OR e) f) NOT g",
        ];

        let start = Instant::now();
        for _ in 0..1000 {
            for query in &queries {
                let _ = parse_and(query);
            }
        }
        let elapsed = start.elapsed();

        assert!(
            elapsed.as_millis() < 1000,
            "Parsing 8,000 queries took {elapsed:?}, expected < 1s"
        );
    }

    /// Returns the number of nested groups above the deepest key.
    fn depth_of(node: &QueryNode) -> usize {
        match node {
            QueryNode::Keys(_) => 0,
            QueryNode::Group(group) => 1 + group.children.iter().map(depth_of).max().unwrap_or(0),
        }
    }

    #[test]
    fn nesting_within_limit_is_kept() {
        let input = format!("{}foo{}", "(NOT ".repeat(10), ")".repeat(10));
        let node = parse_and(&input).unwrap();
        assert_eq!(depth_of(&node), 10);
        assert!(warnings(&input).is_empty());
    }

    #[test]
    fn deep_parentheses_are_capped() {
        let depth = 100_000;
        let input = format!("{}foo{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse_and(&input), Some(keys("foo")));
        assert_eq!(
            warnings(&input),
            vec![ParseWarning::NestingTooDeep {
                token: MAX_DEPTH,
                limit: MAX_DEPTH,
            }]
        );
    }

    #[test]
    fn deep_unclosed_parentheses_are_capped() {
        let input = format!("{}foo", "(".repeat(200_000));
        assert_eq!(parse_and(&input), Some(keys("foo")));
        let warnings = warnings(&input);
        assert_eq!(
            warnings
                .iter()
                .filter(|w| matches!(w, ParseWarning::NestingTooDeep { .. }))
                .count(),
            1
        );
        assert_eq!(
            warnings
                .iter()
                .filter(|w| **w == ParseWarning::UnclosedGroup)
                .count(),
            MAX_DEPTH
        );
    }

    #[test]
    fn deep_negation_is_capped() {
        let input = format!("{}foo", "NOT ".repeat(200_000));
        let node = parse_and(&input).unwrap();
        assert_eq!(depth_of(&node), MAX_DEPTH);
        let QueryNode::Group(group) = &node else {
            panic!("expected a negation group, got {node:?}");
        };
        assert_eq!(group.keys(), vec!["foo"]);
        assert_well_formed(&node);
    }

    #[test]
    fn skipped_groups_close_before_kept_ones() {
        let deep = "(".repeat(MAX_DEPTH + 5);
        let close = ")".repeat(MAX_DEPTH + 5);
        let input = format!("{deep}a b{close} c");
        let node = parse_or(&input).unwrap();
        assert_eq!(node, or(vec![or(vec![keys("a"), keys("b")]), keys("c")]));
        assert!(
            !warnings(&input)
                .iter()
                .any(|w| matches!(w, ParseWarning::UnmatchedCloseParen { .. }))
        );
    }

    /// Checks structural invariants on every group in a tree.
    fn assert_well_formed(node: &QueryNode) {
        if let QueryNode::Group(group) = node {
            assert!(!group.children.is_empty(), "empty group in {node:?}");
            if group.negation {
                assert_eq!(group.conjunction, Conjunction::And);
                assert_eq!(group.children.len(), 1);
            }
            group.children.iter().for_each(assert_well_formed);
        }
    }

    proptest! {
        #[test]
        fn bare_words_keep_order(words in prop::collection::vec("[a-z]{1,8}", 2..8)) {
            let input = words.join(" ");
            let expected: Vec<QueryNode> = words.iter().map(|w| keys(w)).collect();
            prop_assert_eq!(parse_or(&input), Some(or(expected.clone())));
            prop_assert_eq!(parse_and(&input), Some(and(expected)));
        }

        #[test]
        fn trees_are_well_formed(input in "(foo|bar|AND|OR|NOT|\\(|\\)|\"x y\"| ){0,24}") {
            if let Some(node) = parse_or(&input) {
                assert_well_formed(&node);
            }
        }
    }
}
