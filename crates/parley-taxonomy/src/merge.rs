use crate::model::{KeywordEntry, TaxonomyDefinition};
use crate::overrides::OrgOverrides;

/// Combine a template with org overrides into a new definition.
///
/// Purely additive: every base category, topic, role, and rule is kept in
/// place and custom entries are appended after them. A custom entry whose key
/// collides with an existing one is skipped. Custom rules run after template
/// rules.
#[must_use]
pub fn merge(base: &TaxonomyDefinition, overrides: &OrgOverrides) -> TaxonomyDefinition {
    let mut merged = base.clone();
    append_entries("topic", &mut merged.topics, &overrides.topics);
    append_entries("role", &mut merged.roles, &overrides.roles);
    merged
        .severity_rules
        .extend(overrides.severity_rules.iter().cloned());
    merged
}

fn append_entries(kind: &str, target: &mut Vec<KeywordEntry>, custom: &[KeywordEntry]) {
    for entry in custom {
        if target.iter().any(|existing| existing.key == entry.key) {
            tracing::warn!(kind, key = %entry.key, "custom entry collides with existing key; skipped");
            continue;
        }
        let mut entry = entry.clone();
        entry.custom = true;
        target.push(entry);
    }
}
