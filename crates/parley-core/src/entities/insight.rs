use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ConversationCapsule, GradedFinding};
use crate::enums::{RiskLevel, SourceFormat};
use crate::errors::CoreError;

/// Append-only record of one analyzed conversation. Used only as aggregation input.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoredInsight {
    pub id: String,
    pub organization_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source_type: SourceFormat,
    pub participant_count: u32,
    pub message_count: u32,
    pub overall_risk: RiskLevel,
    pub health_score: u8,
    #[serde(default)]
    pub findings: Vec<GradedFinding>,
}

impl StoredInsight {
    /// Build the record for an analyzed capsule.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the organization id is blank or the
    /// health score is outside `0..=100`.
    #[allow(clippy::too_many_arguments)]
    pub fn for_capsule(
        id: String,
        organization_id: &str,
        user_id: Option<String>,
        timestamp: DateTime<Utc>,
        capsule: &ConversationCapsule,
        overall_risk: RiskLevel,
        health_score: u8,
        findings: Vec<GradedFinding>,
    ) -> Result<Self, CoreError> {
        if organization_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "organization_id cannot be empty".into(),
            ));
        }
        if health_score > 100 {
            return Err(CoreError::Validation(format!(
                "health_score must be within 0..=100, got {health_score}"
            )));
        }

        Ok(Self {
            id,
            organization_id: organization_id.to_string(),
            user_id,
            timestamp,
            source_type: capsule.source_format,
            participant_count: capsule.metadata.participant_count,
            message_count: capsule.metadata.message_count,
            overall_risk,
            health_score,
            findings,
        })
    }
}
