//! Organization-specific taxonomy additions.
//!
//! The org layer only ever adds entries. Removal works on custom entries
//! alone: asking to remove a built-in key reports [`RemoveOutcome::BuiltIn`]
//! and changes nothing.

use std::fs;
use std::path::Path;

use parley_core::enums::FindingCategory;
use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::model::{KeywordEntry, TaxonomyDefinition};
use crate::rules::{SeverityRule, WILDCARD};

const MAX_KEY_LEN: usize = 64;

/// Org-custom topics, roles, and rules, persisted as TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgOverrides {
    #[serde(default)]
    pub topics: Vec<KeywordEntry>,
    #[serde(default)]
    pub roles: Vec<KeywordEntry>,
    #[serde(default)]
    pub severity_rules: Vec<SeverityRule>,
}

/// Result of a remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed,
    /// The key belongs to the template; nothing was removed.
    BuiltIn,
    NotFound,
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    Topic,
    Role,
}

impl EntryKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Role => "role",
        }
    }
}

impl OrgOverrides {
    /// Read overrides from a TOML file. A missing file yields empty overrides.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Io` if the file cannot be read and
    /// `TaxonomyError::Parse` if it is not valid overrides TOML.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut overrides: Self = toml::from_str(&raw)?;
        for entry in overrides.topics.iter_mut().chain(overrides.roles.iter_mut()) {
            entry.custom = true;
        }
        Ok(overrides)
    }

    /// Write overrides as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::Io` or `TaxonomyError::Serialize`.
    pub fn save(&self, path: &Path) -> Result<(), TaxonomyError> {
        let io_err = |source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).map_err(io_err)
    }

    /// Add a custom topic on top of `base`.
    ///
    /// # Errors
    ///
    /// `InvalidKey` for a malformed key, `DuplicateKey` if the key is already a
    /// built-in or custom topic.
    pub fn add_custom_topic(
        &mut self,
        base: &TaxonomyDefinition,
        entry: KeywordEntry,
    ) -> Result<(), TaxonomyError> {
        add_entry(EntryKind::Topic, &base.topics, &mut self.topics, entry)
    }

    /// Add a custom role on top of `base`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_custom_topic`].
    pub fn add_custom_role(
        &mut self,
        base: &TaxonomyDefinition,
        entry: KeywordEntry,
    ) -> Result<(), TaxonomyError> {
        add_entry(EntryKind::Role, &base.roles, &mut self.roles, entry)
    }

    pub fn remove_custom_topic(&mut self, base: &TaxonomyDefinition, key: &str) -> RemoveOutcome {
        remove_entry(EntryKind::Topic, &base.topics, &mut self.topics, key)
    }

    pub fn remove_custom_role(&mut self, base: &TaxonomyDefinition, key: &str) -> RemoveOutcome {
        remove_entry(EntryKind::Role, &base.roles, &mut self.roles, key)
    }

    /// Append a custom severity rule. It is evaluated after every template rule.
    ///
    /// # Errors
    ///
    /// `InvalidKey` if `rule.value` is neither `*` nor a value of its category.
    pub fn add_custom_rule(
        &mut self,
        base: &TaxonomyDefinition,
        rule: SeverityRule,
    ) -> Result<(), TaxonomyError> {
        if rule.value != WILDCARD && !category_has_value(base, rule.category, &rule.value) {
            return Err(TaxonomyError::InvalidKey {
                kind: "value",
                key: rule.value,
                reason: format!("not a value of category '{}'", rule.category),
            });
        }
        self.severity_rules.push(rule);
        Ok(())
    }
}

fn category_has_value(base: &TaxonomyDefinition, category: FindingCategory, value: &str) -> bool {
    base.category(category)
        .is_some_and(|definition| definition.value(value).is_some())
}

fn add_entry(
    kind: EntryKind,
    built_in: &[KeywordEntry],
    custom: &mut Vec<KeywordEntry>,
    mut entry: KeywordEntry,
) -> Result<(), TaxonomyError> {
    entry.key = entry.key.trim().to_string();
    validate_key(kind, &entry.key)?;

    let taken = built_in
        .iter()
        .chain(custom.iter())
        .any(|existing| existing.key == entry.key);
    if taken {
        return Err(TaxonomyError::DuplicateKey {
            kind: kind.as_str(),
            key: entry.key,
        });
    }

    if entry.display_name.trim().is_empty() {
        entry.display_name.clone_from(&entry.key);
    }
    entry.keywords = entry
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    entry.custom = true;
    tracing::debug!(kind = kind.as_str(), key = %entry.key, "added custom entry");
    custom.push(entry);
    Ok(())
}

fn remove_entry(
    kind: EntryKind,
    built_in: &[KeywordEntry],
    custom: &mut Vec<KeywordEntry>,
    key: &str,
) -> RemoveOutcome {
    let key = key.trim();
    if built_in.iter().any(|entry| entry.key == key && !entry.custom) {
        tracing::debug!(kind = kind.as_str(), key, "refused to remove built-in entry");
        return RemoveOutcome::BuiltIn;
    }
    match custom.iter().position(|entry| entry.key == key) {
        Some(index) => {
            custom.remove(index);
            RemoveOutcome::Removed
        }
        None => RemoveOutcome::NotFound,
    }
}

/// Keys are lowercase `snake_case`: ASCII letters, digits, and `_`.
fn validate_key(kind: EntryKind, key: &str) -> Result<(), TaxonomyError> {
    let invalid = |reason: &str| TaxonomyError::InvalidKey {
        kind: kind.as_str(),
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(invalid("key is longer than 64 characters"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(invalid("use lowercase letters, digits, and '_'"));
    }
    if !key.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(invalid("key must start with a letter"));
    }
    Ok(())
}
