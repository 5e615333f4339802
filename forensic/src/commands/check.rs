// forensic/src/commands/check.rs
//
// USE CASE: Evaluate one document against the rule set.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

use forensic_core::application::ReportFormatter;

use crate::cli::OutputFormat;
use crate::commands::load_engine;

pub async fn execute(
    document: PathBuf,
    project_dir: PathBuf,
    rules: Vec<String>,
    format: OutputFormat,
    check: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&document)
        .with_context(|| format!("Failed to read document {:?}", document))?;

    let (config, engine, _) = load_engine(&project_dir)?;

    let rule_ids = if rules.is_empty() {
        engine.rule_ids()
    } else {
        rules
    };

    if format == OutputFormat::Text {
        println!(
            "⚖️  Checking {} against {} rule(s) of '{}'...",
            document.display(),
            rule_ids.len(),
            config.name
        );
    }

    let aggregate = Arc::new(engine)
        .evaluate_many_concurrent(rule_ids, text)
        .await;

    match format {
        OutputFormat::Json => println!("{}", aggregate.to_json()?),
        OutputFormat::Text => {
            println!("\n{}", ReportFormatter::render_aggregate(&aggregate));
            if aggregate.overall_compliant {
                println!("✨ Document is compliant.");
            } else {
                eprintln!(
                    "❌ {} rule(s) not satisfied ({} critical).",
                    aggregate.non_compliant,
                    aggregate.critical_failures.len()
                );
            }
        }
    }

    if check && !aggregate.overall_compliant {
        eprintln!("\n💥 --check mode: Failing due to compliance failures.");
        std::process::exit(1);
    }

    Ok(())
}
