//! # parley-insights
//!
//! Append-only insight storage and time-windowed aggregation.
//!
//! A collaborator's `AnalysisReport` is graded against taxonomy rules
//! ([`grade_report`]) and recorded as a `StoredInsight` ([`build_insight`]).
//! Records land in one JSONL file per organization ([`JsonlInsightStore`]).
//! [`InsightAggregator`] reads a window back through the [`InsightSource`]
//! trait and computes dashboard summaries, sparse trend buckets, and topic
//! breakdowns. Aggregation never writes.

pub mod aggregate;
pub mod error;
pub mod grade;
pub mod service;
pub mod source;
pub mod store;

pub use aggregate::{summarize, time_window, topic_breakdown, trends};
pub use error::InsightError;
pub use grade::{build_insight, grade_report};
pub use service::InsightAggregator;
pub use source::InsightSource;
pub use store::JsonlInsightStore;
