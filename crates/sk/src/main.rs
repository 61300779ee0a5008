//! sk: search keys on the command line.
//!
//! Parses free-text search keys into the boolean query trees consumed by search backends,
//! and shows how a given input is tokenized, which parse modes exist and which configuration
//! is in effect.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `init` and `check` must still work when an existing config file is broken.
    let ctx = match &cli.command {
        Commands::Init(_) | Commands::Check => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };

    match ctx {
        Ok(ctx) => commands::run(&cli.command, &ctx),
        Err(code) => code,
    }
}
