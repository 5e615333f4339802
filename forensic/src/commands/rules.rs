// forensic/src/commands/rules.rs
//
// USE CASE: List the registered rules.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use crate::commands::load_engine;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let (config, engine, _) = load_engine(&project_dir)?;

    if engine.registry().is_empty() {
        println!("📭 No rules registered for '{}'.", config.name);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Kind", "Source", "Condition", "Phrases", "On failure"]);

    for rule in engine.registry().rules() {
        let on_failure = match rule.failure_severity() {
            Some(severity) => format!("{} ({})", rule.on_failure.result, severity),
            None => rule.on_failure.result.clone(),
        };
        table.add_row(vec![
            rule.id.clone(),
            rule.kind.to_string(),
            rule.source.clone(),
            rule.condition.label().to_string(),
            rule.condition.phrase_count().to_string(),
            on_failure,
        ]);
    }

    println!("📚 Rules of '{}' ({}):", config.name, engine.registry().len());
    println!("{table}");
    Ok(())
}
