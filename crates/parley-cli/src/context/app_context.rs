use anyhow::Context;
use parley_config::ParleyConfig;
use parley_insights::{InsightAggregator, JsonlInsightStore};
use parley_schema::SchemaRegistry;
use parley_taxonomy::TaxonomyEngine;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: ParleyConfig,
    pub schema: SchemaRegistry,
}

impl AppContext {
    pub fn new(config: ParleyConfig) -> Self {
        Self {
            config,
            schema: SchemaRegistry::new(),
        }
    }

    /// Organization for insight commands: `--org`, then `general.organization_id`.
    pub fn organization(&self, flags: &GlobalFlags) -> anyhow::Result<String> {
        flags
            .org
            .clone()
            .or_else(|| self.config.general.organization_id.clone())
            .filter(|org| !org.trim().is_empty())
            .context(
                "no organization set. Pass --org or set PARLEY_GENERAL__ORGANIZATION_ID",
            )
    }

    /// Engine for the configured industry with its overrides file loaded.
    pub fn taxonomy(&self) -> anyhow::Result<TaxonomyEngine> {
        TaxonomyEngine::from_config(&self.config.taxonomy).with_context(|| {
            format!(
                "failed to load taxonomy for industry '{}'",
                self.config.taxonomy.industry
            )
        })
    }

    pub fn insight_store(&self) -> JsonlInsightStore {
        JsonlInsightStore::new(self.config.insights.store_dir.clone())
    }

    pub fn aggregator(&self) -> InsightAggregator<JsonlInsightStore> {
        InsightAggregator::new(self.insight_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(org: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            org: org.map(str::to_string),
        }
    }

    #[test]
    fn org_flag_wins_over_config() {
        let mut config = ParleyConfig::default();
        config.general.organization_id = Some("from-config".into());
        let ctx = AppContext::new(config);
        assert_eq!(ctx.organization(&flags(Some("acme"))).unwrap(), "acme");
        assert_eq!(ctx.organization(&flags(None)).unwrap(), "from-config");
    }

    #[test]
    fn missing_org_is_an_error() {
        let ctx = AppContext::new(ParleyConfig::default());
        let err = ctx.organization(&flags(Some("  "))).unwrap_err();
        assert!(err.to_string().contains("no organization set"));
    }
}
