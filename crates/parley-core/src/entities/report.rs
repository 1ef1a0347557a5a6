use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FindingCategory, RiskLevel, Severity};

/// What the external analysis collaborator returns for one capsule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnalysisReport {
    #[serde(default)]
    pub capsule_id: Option<String>,
    pub overall_risk: RiskLevel,
    /// 0 (unhealthy) to 100 (healthy).
    pub health_score: u8,
    #[serde(default)]
    pub findings: Vec<ReportedFinding>,
}

/// A classified observation before severity grading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportedFinding {
    pub category: FindingCategory,
    /// One of the category's named values (e.g. `unanswered`).
    pub value: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// A finding after the taxonomy rules assigned it a severity.
///
/// Carries no evidence snippets; stored insights hold classifications only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GradedFinding {
    pub category: FindingCategory,
    pub value: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub severity: Severity,
}
