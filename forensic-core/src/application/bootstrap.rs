// forensic-core/src/application/bootstrap.rs

use tracing::{info, instrument, warn};

use crate::application::engine::ComplianceEngine;
use crate::application::registry::RegistrationSummary;
use crate::domain::configuration::EngineConfig;
use crate::error::ForensicError;
use crate::ports::RuleSource;

/// Builds an engine populated from `source`. Invalid definitions are left out
/// and listed in the returned summary; only a failing source aborts.
#[instrument(skip(source, config), fields(rule_source = %source.describe()))]
pub fn build_engine(
    source: &dyn RuleSource,
    config: EngineConfig,
) -> Result<(ComplianceEngine, RegistrationSummary), ForensicError> {
    let definitions = source.load()?;

    let mut engine = ComplianceEngine::new(config);
    let summary = engine.register_values(definitions);

    if summary.is_clean() {
        info!("✅ {} rule(s) ready", summary.successful);
    } else {
        warn!(
            "⚠️  {} of {} rule definition(s) rejected",
            summary.failed, summary.total
        );
    }

    Ok((engine, summary))
}
