//! Configuration templates for `sk init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations. The `{modes}` placeholder is filled with the ids of the
//! parse modes in the registry the template is rendered for.

use sk_query::ParseModeRegistry;

/// Placeholder replaced with the available parse mode ids.
const MODES_PLACEHOLDER: &str = "{modes}";

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template(registry: &ParseModeRegistry) -> String {
    render(LOCAL_TEMPLATE, registry)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template(registry: &ParseModeRegistry) -> String {
    render(GLOBAL_TEMPLATE, registry)
}

/// Fills in the mode list and comments out the template.
fn render(template: &str, registry: &ParseModeRegistry) -> String {
    let modes = mode_list(&registry.ids());
    comment_template(&template.replace(MODES_PLACEHOLDER, &modes))
}

/// Formats mode ids as an English list: `a`, `a or b`, `a, b or c`.
fn mode_list(ids: &[&str]) -> String {
    match ids {
        [] => "no modes registered".to_string(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} or {last}", rest.join(", ")),
    }
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}
