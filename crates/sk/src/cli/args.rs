//! Clap argument definitions for the `sk` CLI.

use clap::{Args, Parser, Subcommand};
use sk_query::{Conjunction, QueryError};

/// Parse a conjunction from a string.
fn parse_conjunction(s: &str) -> Result<Conjunction, String> {
    s.parse().map_err(|e: QueryError| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sk")]
#[command(about = "Search keys - parse free-text search input into boolean queries")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the configured parse settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ParseOptions {
    /// Parse mode to use (see `sk modes`) [default: complex]
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Conjunction for terms written without an operator: AND or OR [default: AND]
    #[arg(short = 'c', long, value_parser = parse_conjunction)]
    pub conjunction: Option<Conjunction>,
}

/// Where the keys come from.
#[derive(Args, Debug, Clone, Default)]
pub struct KeysInput {
    /// Search keys (joined with spaces)
    #[arg(required_unless_present = "stdin", allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Read raw keys from standard input instead
    #[arg(long, conflicts_with = "keys")]
    pub stdin: bool,
}

/// Arguments for `sk parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Keys to parse.
    pub input: KeysInput,

    #[command(flatten)]
    /// Parse setting overrides.
    pub options: ParseOptions,

    /// Output the query as JSON
    #[arg(long, conflicts_with = "query")]
    pub json: bool,

    /// Output the canonical query string
    #[arg(long)]
    pub query: bool,

    /// Show tokens and parser warnings on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Arguments for `sk tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    #[command(flatten)]
    /// Keys to tokenize.
    pub input: KeysInput,

    #[command(flatten)]
    /// Parse setting overrides.
    pub options: ParseOptions,
}

/// Arguments for `sk modes`.
#[derive(Args, Debug, Clone)]
pub struct ModesCommand {
    #[command(flatten)]
    /// Parse setting overrides.
    pub options: ParseOptions,
}

/// Arguments for `sk init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sk.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sk` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse keys and print the resulting query
    #[command(after_help = "\
KEYS SYNTAX (complex mode):
  term              Term must appear
  term1 term2       Terms joined with the default conjunction
  \"phrase\"          Exact phrase, \\\" for a literal quote
  a AND b           Both terms
  a OR b            Either term
  NOT term          Term must NOT appear
  (expr)            Grouping

Operators are exact uppercase words and combine strictly left to right:
  a OR b AND c      parses as (a OR b) AND c

EXAMPLES:
  sk parse rust async
  sk parse '\"error handling\" NOT panic'
  sk parse --conjunction OR rust golang
  sk parse --mode terms 'rust -deprecated'
  sk parse --json '(rust OR golang) AND async'")]
    Parse(ParseCommand),

    /// Show the token stream for keys
    Tokens(TokensCommand),

    /// List the available parse modes
    Modes(ModesCommand),

    /// Initialize sk configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "sk", "parse", "--mode", "terms", "-c", "or", "--json", "foo", "bar",
        ])
        .unwrap();

        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.input.keys, vec!["foo", "bar"]);
        assert_eq!(cmd.options.mode.as_deref(), Some("terms"));
        assert_eq!(cmd.options.conjunction, Some(Conjunction::Or));
        assert!(cmd.json);
        assert!(!cmd.query);
    }

    #[test]
    fn parse_rejects_invalid_conjunction() {
        let result = Cli::try_parse_from(["sk", "parse", "--conjunction", "XOR", "foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_requires_keys_or_stdin() {
        assert!(Cli::try_parse_from(["sk", "parse"]).is_err());
        assert!(Cli::try_parse_from(["sk", "parse", "--stdin"]).is_ok());
        assert!(Cli::try_parse_from(["sk", "parse", "--stdin", "foo"]).is_err());
    }

    #[test]
    fn json_and_query_conflict() {
        let result = Cli::try_parse_from(["sk", "parse", "--json", "--query", "foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn operators_pass_through_as_keys() {
        let cli = Cli::try_parse_from(["sk", "tokens", "NOT", "(a", "OR", "b)"]).unwrap();
        let Commands::Tokens(cmd) = cli.command else {
            panic!("expected tokens command");
        };
        assert_eq!(cmd.input.keys, vec!["NOT", "(a", "OR", "b)"]);
    }
}
