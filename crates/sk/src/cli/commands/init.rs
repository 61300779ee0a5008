//! Implementation of `sk init`.

use std::{fs, process::ExitCode};

use sk_config::{CONFIG_FILENAME, ConfigError, global_config_path, global_template, local_template};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{indent, render_toml, subheader, success},
};

/// Writes a commented `.sk.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let cwd = &ctx.cwd;

    let is_home_dir = global_config_path()
        .and_then(|p| p.parent().map(|h| h == cwd))
        .unwrap_or(false);

    let use_global = cmd.global || is_home_dir;

    let config_path = if use_global {
        match global_config_path() {
            Some(path) => path,
            None => {
                eprintln!("error: {}", ConfigError::NoHomeDirectory);
                return ExitCode::FAILURE;
            }
        }
    } else {
        cwd.join(CONFIG_FILENAME)
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("hint: use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if use_global {
        global_template(&ctx.registry)
    } else {
        local_template(&ctx.registry)
    };

    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    let color = ctx.color();
    let created = format!("Created {}", config_path.display());
    println!("{}", if color { success(&created) } else { created });

    println!();
    let heading = "Configuration written:";
    println!("{}", if color { subheader(heading) } else { heading.to_string() });
    println!("{}", indent(&render_toml(&template, color)));

    ExitCode::SUCCESS
}
