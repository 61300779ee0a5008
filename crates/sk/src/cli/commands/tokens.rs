//! Implementation of `sk tokens`.

use std::process::ExitCode;

use crate::cli::{
    args::TokensCommand,
    context::{CommandContext, read_keys},
    output::{dim_if, render_tokens, report_query_error, report_warnings},
};

/// Prints the token stream the selected mode produces for the keys.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
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

    let color = ctx.color();
    if analysis.tokens.is_empty() {
        println!("{}", dim_if(color, "(no tokens)"));
    } else {
        print!("{}", render_tokens(&analysis.tokens, color));
    }
    report_warnings(&analysis.warnings);

    ExitCode::SUCCESS
}
