use parley_core::enums::FindingCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rules::SeverityRule;

/// One named value of a category, with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryValue {
    pub key: String,
    /// May contain a `{topic}` placeholder.
    pub message_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDefinition {
    pub category: FindingCategory,
    pub display_name: String,
    pub values: Vec<CategoryValue>,
}

impl CategoryDefinition {
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&CategoryValue> {
        self.values.iter().find(|v| v.key == key)
    }
}

/// A topic or role: a key, a display name, and the keywords that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordEntry {
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Added by the organization rather than a template.
    #[serde(default)]
    pub custom: bool,
}

impl KeywordEntry {
    #[must_use]
    pub fn new(key: &str, display_name: &str, keywords: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            custom: false,
        }
    }
}

/// The full taxonomy used to classify and grade findings for an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxonomyDefinition {
    pub industry: String,
    pub categories: Vec<CategoryDefinition>,
    pub topics: Vec<KeywordEntry>,
    pub roles: Vec<KeywordEntry>,
    /// Evaluated first-match in this order.
    pub severity_rules: Vec<SeverityRule>,
}

impl TaxonomyDefinition {
    #[must_use]
    pub fn category(&self, category: FindingCategory) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.category == category)
    }

    #[must_use]
    pub fn topic(&self, key: &str) -> Option<&KeywordEntry> {
        self.topics.iter().find(|t| t.key == key)
    }

    #[must_use]
    pub fn role(&self, key: &str) -> Option<&KeywordEntry> {
        self.roles.iter().find(|r| r.key == key)
    }
}
