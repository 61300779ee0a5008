//! Implementation of `sk config`.

use std::process::ExitCode;

use crate::cli::{
    context::CommandContext,
    output::{render_toml, rule},
};

/// Width of the rules framing highlighted settings.
const RULE_WIDTH: usize = 40;

/// Shows effective configuration settings.
///
/// Plain output is valid TOML; coloured output is framed by rules.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = ctx.config.settings_to_toml();
    let color = ctx.color();
    if color {
        println!("{}", rule(RULE_WIDTH));
    }
    print!("{}", render_toml(&toml, color));
    if color {
        println!("{}", rule(RULE_WIDTH));
    }
    ExitCode::SUCCESS
}
