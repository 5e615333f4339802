// forensic/src/commands/export.rs
//
// USE CASE: Export the validated rule set for another engine instance.

use anyhow::Context;
use std::path::PathBuf;

use forensic_core::infrastructure::fs::write_export;

use crate::commands::load_engine;

pub fn execute(project_dir: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let (_, engine, summary) = load_engine(&project_dir)?;

    let payload = engine.export_rules()?;
    write_export(&output, &payload)
        .with_context(|| format!("Failed to write rule export to {:?}", output))?;

    println!(
        "💾 Exported {} rule(s) to {} ({} rejected definition(s) left out)",
        engine.registry().len(),
        output.display(),
        summary.failed
    );
    Ok(())
}
