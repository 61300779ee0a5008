//! Query tree.
//!
//! Represents parsed keys in the shape a search backend consumes: leaves are plain key
//! strings, inner nodes are groups combining their children with a conjunction.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// The boolean combinator applied between sibling keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Conjunction {
    /// All children must match.
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    /// At least one child must match.
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Conjunction {
    /// Returns the keyword spelling of the conjunction.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Conjunction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("AND") {
            Ok(Self::And)
        } else if s.eq_ignore_ascii_case("OR") {
            Ok(Self::Or)
        } else {
            Err(QueryError::InvalidConjunction {
                value: s.to_string(),
            })
        }
    }
}

/// A node in the query tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryNode {
    /// A bare term or phrase, without quotes.
    Keys(String),
    /// A structured group of child nodes.
    Group(Group),
}

impl QueryNode {
    /// Returns true if this node is a negation group.
    pub fn is_negation(&self) -> bool {
        matches!(self, Self::Group(group) if group.negation)
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Self::Keys(keys) => writeln!(f, "{}Keys({keys:?})", "  ".repeat(indent)),
            Self::Group(group) => group.fmt_tree(f, indent),
        }
    }

    /// Formats the node in the search-keys language.
    ///
    /// `nested` is true when the node sits inside a group and needs parentheses.
    fn fmt_query_string(&self, nested: bool) -> String {
        match self {
            Self::Keys(keys) => quote_keys(keys),
            Self::Group(group) => group.fmt_query_string(nested),
        }
    }
}

impl From<Group> for QueryNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<&str> for QueryNode {
    fn from(keys: &str) -> Self {
        Self::Keys(keys.to_string())
    }
}

/// A group of child nodes combined with a conjunction, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// How the children are combined.
    pub conjunction: Conjunction,
    /// Whether the group as a whole must NOT match.
    pub negation: bool,
    /// Child nodes in input order.
    pub children: Vec<QueryNode>,
}

impl Group {
    /// Creates a non-negated group.
    pub fn new(conjunction: Conjunction, children: Vec<QueryNode>) -> Self {
        Self {
            conjunction,
            negation: false,
            children,
        }
    }

    /// Creates a negation group wrapping a single child.
    ///
    /// Negation groups always use the AND conjunction.
    pub fn negated(child: QueryNode) -> Self {
        Self {
            conjunction: Conjunction::And,
            negation: true,
            children: vec![child],
        }
    }

    /// Returns true if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns all leaf keys in input order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    /// Appends leaf keys to `out` depth-first.
    fn collect_keys<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                QueryNode::Keys(keys) => out.push(keys),
                QueryNode::Group(group) => group.collect_keys(out),
            }
        }
    }

    /// Formats the group as a query string in the search-keys language.
    ///
    /// This produces output like: `foo AND (bar OR "baz qux") AND NOT quux`
    pub fn to_query_string(&self) -> String {
        self.fmt_query_string(false)
    }

    /// Internal helper for query string formatting.
    fn fmt_query_string(&self, nested: bool) -> String {
        if self.negation {
            let inner: Vec<String> = self
                .children
                .iter()
                .map(|child| child.fmt_query_string(true))
                .collect();
            return format!("NOT {}", inner.join(" "));
        }

        let separator = format!(" {} ", self.conjunction);
        let parts: Vec<String> = self
            .children
            .iter()
            .map(|child| child.fmt_query_string(true))
            .collect();
        let joined = parts.join(&separator);

        if nested && self.children.len() > 1 {
            format!("({joined})")
        } else {
            joined
        }
    }

    /// Formats the group as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        if self.negation {
            writeln!(f, "{prefix}Not")?;
        } else {
            writeln!(f, "{prefix}{}", self.conjunction)?;
        }
        for child in &self.children {
            child.fmt_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Quotes keys that would not survive re-tokenization as a single term.
fn quote_keys(keys: &str) -> String {
    let needs_quotes = keys.is_empty()
        || keys.contains(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
        || matches!(keys, "AND" | "OR" | "NOT");

    if needs_quotes {
        format!("\"{}\"", keys.replace('"', "\\\""))
    } else {
        keys.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(s: &str) -> QueryNode {
        QueryNode::from(s)
    }

    #[test]
    fn conjunction_from_str_is_case_insensitive() {
        assert_eq!("AND".parse::<Conjunction>().unwrap(), Conjunction::And);
        assert_eq!("or".parse::<Conjunction>().unwrap(), Conjunction::Or);
        assert!(matches!(
            "XOR".parse::<Conjunction>(),
            Err(QueryError::InvalidConjunction { .. })
        ));
    }

    #[test]
    fn negated_forces_and() {
        let group = Group::negated(keys("foo"));
        assert!(group.negation);
        assert_eq!(group.conjunction, Conjunction::And);
        assert_eq!(group.children, vec![keys("foo")]);
    }

    #[test]
    fn keys_in_order() {
        let group = Group::new(
            Conjunction::Or,
            vec![
                keys("a"),
                Group::new(Conjunction::And, vec![keys("b"), keys("c")]).into(),
                Group::negated(keys("d")).into(),
            ],
        );
        assert_eq!(group.keys(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn query_string_parenthesizes_nested_groups() {
        let group = Group::new(
            Conjunction::And,
            vec![
                keys("foo"),
                Group::new(Conjunction::Or, vec![keys("bar"), keys("baz qux")]).into(),
                Group::negated(keys("quux")).into(),
            ],
        );
        assert_eq!(
            group.to_query_string(),
            "foo AND (bar OR \"baz qux\") AND NOT quux"
        );
    }

    #[test]
    fn query_string_quotes_operator_keys() {
        let group = Group::new(Conjunction::And, vec![keys("AND"), keys("say \"hi\"")]);
        assert_eq!(group.to_query_string(), "\"AND\" AND \"say \\\"hi\\\"\"");
    }

    #[test]
    fn tree_display() {
        let group = Group::new(
            Conjunction::And,
            vec![keys("foo"), Group::negated(keys("bar")).into()],
        );
        assert_eq!(
            group.to_string(),
            "AND\n  Keys(\"foo\")\n  Not\n    Keys(\"bar\")\n"
        );
    }

    #[test]
    fn serializes_for_backends() {
        let group = Group::new(
            Conjunction::Or,
            vec![keys("foo"), Group::negated(keys("bar")).into()],
        );
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "conjunction": "OR",
                "negation": false,
                "children": [
                    "foo",
                    {"conjunction": "AND", "negation": true, "children": ["bar"]}
                ]
            })
        );
    }
}
