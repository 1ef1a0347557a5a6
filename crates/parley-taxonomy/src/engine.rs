//! Org-scoped taxonomy service.

use std::path::{Path, PathBuf};

use parley_config::TaxonomyConfig;
use parley_core::entities::ReportedFinding;
use parley_core::enums::Severity;

use crate::error::TaxonomyError;
use crate::merge::merge;
use crate::model::{KeywordEntry, TaxonomyDefinition};
use crate::overrides::{OrgOverrides, RemoveOutcome};
use crate::rules::{SeverityRule, evaluate_finding};
use crate::templates::{available_industries, resolve};

/// Taxonomy for one organization: an industry template plus its overrides.
///
/// The merged definition is rebuilt on every call from the static template
/// and the current overrides. Nothing merged is cached between calls.
#[derive(Debug, Clone)]
pub struct TaxonomyEngine {
    industry: String,
    overrides: OrgOverrides,
    overrides_path: Option<PathBuf>,
}

impl TaxonomyEngine {
    /// # Errors
    ///
    /// Returns `UnknownIndustry` if `industry` has no template.
    pub fn new(industry: &str, overrides: OrgOverrides) -> Result<Self, TaxonomyError> {
        let industry = resolve(industry)?.industry;
        Ok(Self {
            industry,
            overrides,
            overrides_path: None,
        })
    }

    /// Build from the `taxonomy` config section, loading overrides from
    /// `overrides_path` when set.
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndustry`, or the overrides load error.
    pub fn from_config(config: &TaxonomyConfig) -> Result<Self, TaxonomyError> {
        let overrides = match &config.overrides_path {
            Some(path) => OrgOverrides::load(path)?,
            None => OrgOverrides::default(),
        };
        let mut engine = Self::new(&config.industry, overrides)?;
        engine.overrides_path.clone_from(&config.overrides_path);
        Ok(engine)
    }

    #[must_use]
    pub fn available_industries() -> Vec<&'static str> {
        available_industries()
    }

    /// Base template for any industry, without org overrides.
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndustry`.
    pub fn template(industry: &str) -> Result<TaxonomyDefinition, TaxonomyError> {
        resolve(industry)
    }

    #[must_use]
    pub fn industry(&self) -> &str {
        &self.industry
    }

    #[must_use]
    pub const fn overrides(&self) -> &OrgOverrides {
        &self.overrides
    }

    #[must_use]
    pub fn overrides_path(&self) -> Option<&Path> {
        self.overrides_path.as_deref()
    }

    /// Template merged with this organization's overrides.
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndustry` if the template vanished, which cannot happen
    /// for an engine built through [`Self::new`].
    pub fn definition(&self) -> Result<TaxonomyDefinition, TaxonomyError> {
        Ok(merge(&resolve(&self.industry)?, &self.overrides))
    }

    /// Grade one finding against the merged rules.
    ///
    /// # Errors
    ///
    /// Same as [`Self::definition`].
    pub fn evaluate(&self, finding: &ReportedFinding) -> Result<Severity, TaxonomyError> {
        let definition = self.definition()?;
        Ok(evaluate_finding(&definition.severity_rules, finding))
    }

    /// # Errors
    ///
    /// `DuplicateKey` or `InvalidKey`; the engine is unchanged on error.
    pub fn add_custom_topic(&mut self, entry: KeywordEntry) -> Result<(), TaxonomyError> {
        let base = resolve(&self.industry)?;
        self.overrides.add_custom_topic(&base, entry)
    }

    /// # Errors
    ///
    /// `DuplicateKey` or `InvalidKey`; the engine is unchanged on error.
    pub fn add_custom_role(&mut self, entry: KeywordEntry) -> Result<(), TaxonomyError> {
        let base = resolve(&self.industry)?;
        self.overrides.add_custom_role(&base, entry)
    }

    /// # Errors
    ///
    /// `InvalidKey` if the rule names an unknown category value.
    pub fn add_custom_rule(&mut self, rule: SeverityRule) -> Result<(), TaxonomyError> {
        let base = resolve(&self.industry)?;
        self.overrides.add_custom_rule(&base, rule)
    }

    /// Remove a custom topic. Built-in keys are left alone.
    ///
    /// # Errors
    ///
    /// Same as [`Self::definition`].
    pub fn remove_custom_topic(&mut self, key: &str) -> Result<RemoveOutcome, TaxonomyError> {
        let base = resolve(&self.industry)?;
        Ok(self.overrides.remove_custom_topic(&base, key))
    }

    /// Remove a custom role. Built-in keys are left alone.
    ///
    /// # Errors
    ///
    /// Same as [`Self::definition`].
    pub fn remove_custom_role(&mut self, key: &str) -> Result<RemoveOutcome, TaxonomyError> {
        let base = resolve(&self.industry)?;
        Ok(self.overrides.remove_custom_role(&base, key))
    }

    /// Write the overrides back to the file they were loaded from.
    ///
    /// # Errors
    ///
    /// `InvalidKey` with kind `path` if no overrides path is configured, or the
    /// write error.
    pub fn persist(&self) -> Result<(), TaxonomyError> {
        let path = self
            .overrides_path
            .as_deref()
            .ok_or_else(|| TaxonomyError::InvalidKey {
                kind: "path",
                key: "taxonomy.overrides_path".to_string(),
                reason: "no overrides file configured".to_string(),
            })?;
        self.overrides.save(path)
    }
}
