//! Taxonomy selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_industry() -> String {
    String::from("default")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    /// Industry template key (`legal`, `healthcare`, `finance`, `retail`,
    /// `technology`, `default`).
    #[serde(default = "default_industry")]
    pub industry: String,

    /// TOML file holding organization-custom topics, roles, and severity rules.
    #[serde(default)]
    pub overrides_path: Option<PathBuf>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            industry: default_industry(),
            overrides_path: None,
        }
    }
}
