//! Implementation of `sk parse`.

use std::process::ExitCode;

use sk_config::OutputFormat;

use crate::cli::{
    args::ParseCommand,
    context::{CommandContext, read_keys},
    output::{
        NO_QUERY, dim_if, render_json, render_tokens, render_tree, report_query_error,
        report_warnings,
    },
};

/// Parses keys with the selected mode and prints the query.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let mode = match ctx.parse_mode(&cmd.options) {
        Ok(mode) => mode,
        Err(code) => return code,
    };
    let keys = match read_keys(&cmd.input) {
        Ok(keys) => keys,
        Err(code) => return code,
    };

    let analysis = match mode.analyze(&keys) {
        Ok(analysis) => analysis,
        Err(e) => {
            report_query_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if cmd.verbose {
        eprintln!("mode: {} ({})", mode.id(), mode.conjunction());
        eprint!("{}", render_tokens(&analysis.tokens, false));
        report_warnings(&analysis.warnings);
    }

    let format = if cmd.json {
        OutputFormat::Json
    } else if cmd.query {
        OutputFormat::Query
    } else {
        ctx.config.output.format
    };
    let color = ctx.color();

    match (format, &analysis.query) {
        (OutputFormat::Json, query) => match render_json(query.as_ref(), color) {
            Ok(json) => print!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        },
        (_, None) => {
            println!("{}", dim_if(color, NO_QUERY));
        }
        (OutputFormat::Tree, Some(group)) => print!("{}", render_tree(group, color)),
        (OutputFormat::Query, Some(group)) => println!("{}", group.to_query_string()),
    }

    ExitCode::SUCCESS
}
