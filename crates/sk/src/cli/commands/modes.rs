//! Implementation of `sk modes`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{
    args::ModesCommand,
    context::CommandContext,
    output::{dim_if, subheader},
};

/// Lists the registered parse modes, marking the active one.
pub fn run(ctx: &CommandContext, cmd: &ModesCommand) -> ExitCode {
    let settings = ctx.parse_settings(&cmd.options);
    let active = settings.mode.as_str();
    let conjunction = settings.conjunction;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Mode", "Label", "Description"]);

    for mode in ctx.registry.create_all(conjunction) {
        let id = if mode.id() == active {
            format!("{} *", mode.id())
        } else {
            mode.id().to_string()
        };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(mode.label()),
            Cell::new(mode.description()),
        ]);
    }

    let color = ctx.color();
    let heading = format!("Parse modes (default conjunction {conjunction}):");
    println!("{}", if color { subheader(&heading) } else { heading });
    println!("{table}");

    if !ctx.registry.contains(active) {
        eprintln!("warning: selected mode '{active}' is not available");
        return ExitCode::FAILURE;
    }

    println!("{}", dim_if(color, "* selected mode"));

    ExitCode::SUCCESS
}
