//! Rendering and JSON serialization for CLI output.

pub use sk_highlight::{dim, header, rule, subheader, success, warning};
use sk_highlight::{Highlighter, query_tree};
use sk_query::{Group, ParseWarning, QueryError, Token};

/// Placeholder printed when keys produce no query.
pub const NO_QUERY: &str = "(no query)";

/// Dims `text` when colour is enabled.
pub fn dim_if(color: bool, text: &str) -> String {
    if color { dim(text) } else { text.to_string() }
}

/// Renders a query as an indented tree.
pub fn render_tree(group: &Group, color: bool) -> String {
    if color {
        query_tree(group)
    } else {
        group.to_string()
    }
}

/// Renders an optional query as pretty JSON; `None` becomes `null`.
pub fn render_json(group: Option<&Group>, color: bool) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(&group)?;
    json.push('\n');
    if color {
        json = Highlighter::new().highlight_json(&json);
    }
    Ok(json)
}

/// Renders TOML, highlighted when colour is enabled.
pub fn render_toml(toml: &str, color: bool) -> String {
    if color {
        Highlighter::new().highlight_toml(toml)
    } else {
        toml.to_string()
    }
}

/// Renders one line per token: its kind, then its source form.
pub fn render_tokens(tokens: &[Token], color: bool) -> String {
    let mut out = String::new();
    for token in tokens {
        let kind = format!("{:<9}", token.kind());
        if color {
            out.push_str(&dim(&kind));
            out.push_str(&sk_highlight::token(token));
        } else {
            out.push_str(&kind);
            out.push_str(&token.to_string());
        }
        out.push('\n');
    }
    out
}

/// Indents every line of `content` by two spaces.
pub fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints parser warnings to stderr.
pub fn report_warnings(warnings: &[ParseWarning]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

/// Prints a query error and its hint to stderr.
pub fn report_query_error(err: &QueryError) {
    eprintln!("error: {err}");
    if let Some(hint) = err.hint() {
        eprintln!("hint: {hint}");
    }
}
