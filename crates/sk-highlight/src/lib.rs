//! Syntax highlighting and terminal colors for sk.
//!
//! This crate highlights configuration and JSON output, colours query tokens and trees by
//! kind, and provides styled terminal output for headers and status messages.

#![warn(missing_docs)]

use sk_query::{Group, QueryNode, Token};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Lazily loaded colour themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the named syntax, falling back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (headers, conjunctions).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (success, phrases).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (errors, negation).
    pub const RED: &str = "\x1b[31m";
    /// Magenta text (operators).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Dim/gray text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps text in the given style codes.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Colours a token in its source form according to its kind.
pub fn token(token: &Token) -> String {
    let text = token.to_string();
    match token {
        Token::Term(_) => text,
        Token::Phrase(_) => paint(colors::GREEN, &text),
        Token::Operator(_) => {
            format!("{}{}{}{}", colors::BOLD, colors::MAGENTA, text, colors::RESET)
        }
        Token::OpenParen | Token::CloseParen => dim(&text),
    }
}

/// Renders a query tree with the same layout as its `Display` form, coloured by node kind.
pub fn query_tree(group: &Group) -> String {
    let mut out = String::new();
    write_group(&mut out, group, 0);
    out
}

/// Appends a coloured group and its children to `out`.
fn write_group(out: &mut String, group: &Group, indent: usize) {
    out.push_str(&"  ".repeat(indent));
    if group.negation {
        out.push_str(&format!("{}{}Not{}", colors::BOLD, colors::RED, colors::RESET));
    } else {
        out.push_str(&header(group.conjunction.keyword()));
    }
    out.push('\n');

    for child in &group.children {
        match child {
            QueryNode::Keys(keys) => {
                out.push_str(&"  ".repeat(indent + 1));
                out.push_str(&format!("Keys({})", paint(colors::GREEN, &format!("{keys:?}"))));
                out.push('\n');
            }
            QueryNode::Group(inner) => write_group(out, inner, indent + 1),
        }
    }
}
