//! Implementation of `sk check`.

use std::process::ExitCode;

use sk_config::{Config, ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim_if, header, success, warning},
};

/// Lists discovered config files and reports validation warnings.
///
/// Exits with failure if the configuration cannot be loaded or has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let color = ctx.color();
    let config_files = discover_config_files(&ctx.cwd);

    if config_files.is_empty() {
        println!("{}", dim_if(color, "No configuration files found."));
        println!();
        println!("Run 'sk init' to create a configuration file.");
        return ExitCode::SUCCESS;
    }

    let heading = "Config files (highest precedence first):";
    println!("{}", if color { header(heading) } else { heading.to_string() });
    for path in &config_files {
        let scope = if is_global_config(path) {
            "global"
        } else {
            "local"
        };
        println!(
            "   {} {}",
            path.display(),
            dim_if(color, &format!("({scope})"))
        );
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let warnings = config.validate(&ctx.registry);
    if warnings.is_empty() {
        let text = "No issues found.";
        println!("{}", if color { success(text) } else { text.to_string() });
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for w in &warnings {
        let text = w.to_string();
        println!("   {}", if color { warning(&text) } else { text });
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::UnknownParseMode { .. } => {
                println!("Hint: set [parse] mode to one of the modes listed by 'sk modes'");
            }
        }
    }
}
