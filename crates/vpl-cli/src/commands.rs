use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info;

use vpl_cli::script::Script;
use vpl_cli::session::{ReplayReport, replay};
use vpl_model::{ClickMode, KIND_TABLE};

use crate::cli::ReplayArgs;
use crate::summary::apply_table_style;

pub fn run_kinds() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Kind",
        "Role",
        "Sub-buttons",
        "States",
        "Click",
        "IR arity",
    ]);
    apply_table_style(&mut table);
    for spec in &KIND_TABLE {
        let mode = match spec.mode {
            ClickMode::Toggle => "toggle",
            ClickMode::Exclusive => "exclusive",
        };
        table.add_row(vec![
            Cell::new(spec.name),
            Cell::new(spec.role),
            Cell::new(spec.sub_buttons).set_alignment(CellAlignment::Right),
            Cell::new(spec.states).set_alignment(CellAlignment::Right),
            Cell::new(mode),
            Cell::new(spec.ir_arity).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_replay(args: &ReplayArgs) -> Result<ReplayReport> {
    let script = Script::load(&args.script)?;
    info!(script = %args.script.display(), "loaded replay script");
    let report = replay(&script, args.strict)?;
    if !args.no_ir {
        let json = serde_json::to_string_pretty(&report.program).context("serialize program IR")?;
        println!("{json}");
    }
    Ok(report)
}
