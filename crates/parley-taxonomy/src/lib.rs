//! # parley-taxonomy
//!
//! Categories, topics, roles, and severity rules used to classify and grade
//! findings.
//!
//! A definition is built from three immutable layers combined by a pure
//! merge:
//!
//! ```text
//! default template ─▶ industry template ─▶ org overrides ─▶ TaxonomyDefinition
//! ```
//!
//! Later layers only add entries. Severity is assigned by the first rule in
//! definition order that matches a finding's category, value, and topic.

pub mod categories;
pub mod engine;
pub mod error;
pub mod matching;
pub mod merge;
pub mod model;
pub mod overrides;
pub mod rules;
pub mod templates;

pub use engine::TaxonomyEngine;
pub use error::TaxonomyError;
pub use matching::{match_roles, match_topics, render_message};
pub use merge::merge;
pub use model::{CategoryDefinition, CategoryValue, KeywordEntry, TaxonomyDefinition};
pub use overrides::{OrgOverrides, RemoveOutcome};
pub use rules::{RuleCondition, SeverityRule, WILDCARD, evaluate, evaluate_finding};
pub use templates::{DEFAULT_INDUSTRY, available_industries, resolve};
