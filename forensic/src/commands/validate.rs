// forensic/src/commands/validate.rs
//
// USE CASE: Lint rule definitions before they are used on a document.

use std::path::PathBuf;

use crate::commands::load_engine;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    println!("🔎 Validating rule definitions...");

    let (config, _, summary) = load_engine(&project_dir)?;

    println!("   Project: {}", config.name);
    println!(
        "   Rules: {} total, {} valid, {} rejected",
        summary.total, summary.successful, summary.failed
    );

    if summary.is_clean() {
        println!("✅ All rule definitions are valid.");
        return Ok(());
    }

    eprintln!("\n⚠️  {} invalid rule definition(s):", summary.failed);
    for failure in &summary.errors {
        eprintln!(
            "   ❌ #{} {}: {}",
            failure.index,
            failure.rule_id.as_deref().unwrap_or("<unnamed>"),
            failure.reason
        );
    }
    std::process::exit(1);
}
