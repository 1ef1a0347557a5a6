//! Central schema registry for all Parley interchange types.
//!
//! The `SchemaRegistry` builds JSON Schemas from parley-core and
//! parley-taxonomy types at construction time using
//! [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the Parley system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all entity, response, and taxonomy
    /// schemas.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity types (8) ---
        register!(
            schemas,
            "conversation_capsule",
            parley_core::entities::ConversationCapsule
        );
        register!(schemas, "participant", parley_core::entities::Participant);
        register!(
            schemas,
            "declared_participant",
            parley_core::entities::DeclaredParticipant
        );
        register!(schemas, "message", parley_core::entities::Message);
        register!(
            schemas,
            "analysis_report",
            parley_core::entities::AnalysisReport
        );
        register!(
            schemas,
            "reported_finding",
            parley_core::entities::ReportedFinding
        );
        register!(
            schemas,
            "graded_finding",
            parley_core::entities::GradedFinding
        );
        register!(
            schemas,
            "stored_insight",
            parley_core::entities::StoredInsight
        );

        // --- Aggregation responses (3) ---
        register!(
            schemas,
            "dashboard_summary",
            parley_core::responses::DashboardSummary
        );
        register!(schemas, "trend_series", parley_core::responses::TrendSeries);
        register!(
            schemas,
            "topic_breakdown_response",
            parley_core::responses::TopicBreakdownResponse
        );

        // --- Taxonomy (2) ---
        register!(
            schemas,
            "taxonomy_definition",
            parley_taxonomy::TaxonomyDefinition
        );
        register!(schemas, "severity_rule", parley_taxonomy::SeverityRule);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate `instance` against `name`, then deserialize it.
    ///
    /// # Errors
    ///
    /// Any [`Self::validate`] error, or `SchemaError::Deserialize`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        Ok(serde_json::from_value(instance)?)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
