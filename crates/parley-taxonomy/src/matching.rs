//! Keyword matching and finding messages.

use parley_core::enums::FindingCategory;

use crate::model::{KeywordEntry, TaxonomyDefinition};

/// Wording used for `{topic}` when a finding has no topic.
const NO_TOPIC: &str = "this conversation";

/// Topics whose keywords (or key) occur in `text` as whole words, in
/// definition order. Matching ignores case.
#[must_use]
pub fn match_topics<'a>(definition: &'a TaxonomyDefinition, text: &str) -> Vec<&'a KeywordEntry> {
    match_entries(&definition.topics, text)
}

/// Roles whose keywords occur in `text`; same rules as [`match_topics`].
#[must_use]
pub fn match_roles<'a>(definition: &'a TaxonomyDefinition, text: &str) -> Vec<&'a KeywordEntry> {
    match_entries(&definition.roles, text)
}

fn match_entries<'a>(entries: &'a [KeywordEntry], text: &str) -> Vec<&'a KeywordEntry> {
    let haystack = text.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            std::iter::once(entry.key.replace('_', " "))
                .chain(entry.keywords.iter().map(|k| k.to_lowercase()))
                .any(|needle| contains_word(&haystack, needle.trim()))
        })
        .collect()
}

/// `needle` occurs in `haystack` bounded by non-alphanumeric characters.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Human-readable message for a finding, from the category value's template.
///
/// `{topic}` is replaced by the topic's display name when the topic is known,
/// by the raw topic otherwise, and by a neutral phrase when there is none.
/// Returns `None` if the category has no such value.
#[must_use]
pub fn render_message(
    definition: &TaxonomyDefinition,
    category: FindingCategory,
    value: &str,
    topic: Option<&str>,
) -> Option<String> {
    let template = &definition.category(category)?.value(value)?.message_template;
    let topic_text = topic.map_or(NO_TOPIC, |key| {
        definition
            .topic(key)
            .map_or(key, |entry| entry.display_name.as_str())
    });
    Some(template.replace("{topic}", topic_text))
}
