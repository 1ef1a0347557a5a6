//! Aggregation response types returned by the insight aggregator and
//! rendered by `parley insight summary|trends|topics`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::GroupBy;

/// Closed time window `[since, until]` an aggregation ran over.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub days: u32,
}

/// Conversation counts per overall risk level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// Response from `parley insight summary`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardSummary {
    pub organization_id: String,
    pub window: TimeWindow,
    pub total_conversations: u32,
    pub risk: RiskCounts,
    /// `0.0` when the window holds no conversations.
    pub average_health_score: f64,
    pub findings_by_category: BTreeMap<String, u32>,
    pub conversations_by_source: BTreeMap<String, u32>,
}

/// One non-empty bucket of a trend series.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TrendBucket {
    /// `YYYY-MM-DD`, `YYYY-Www`, or `YYYY-MM` depending on granularity.
    pub bucket: String,
    pub bucket_start: DateTime<Utc>,
    pub conversations: u32,
    pub high_risk: u32,
    pub average_health_score: f64,
}

/// Response from `parley insight trends`. `buckets` is sparse.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TrendSeries {
    pub organization_id: String,
    pub window: TimeWindow,
    pub group_by: GroupBy,
    pub buckets: Vec<TrendBucket>,
}

/// Occurrence counts for one topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopicBreakdown {
    pub topic: String,
    pub occurrences: u32,
    pub high_severity: u32,
    pub by_category: BTreeMap<String, u32>,
}

/// Response from `parley insight topics`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopicBreakdownResponse {
    pub organization_id: String,
    pub window: TimeWindow,
    pub topics: Vec<TopicBreakdown>,
}
