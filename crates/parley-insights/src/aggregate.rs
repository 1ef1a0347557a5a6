//! Pure aggregation over a slice of stored insights.
//!
//! Callers hand in records already scoped to one organization and window;
//! nothing here reads a store or the clock.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use parley_core::entities::StoredInsight;
use parley_core::enums::{GroupBy, RiskLevel};
use parley_core::responses::{
    DashboardSummary, RiskCounts, TimeWindow, TopicBreakdown, TopicBreakdownResponse, TrendBucket,
    TrendSeries,
};

use crate::error::InsightError;

/// The window `[now - days, now]`.
///
/// # Errors
///
/// Returns `InsightError::InvalidWindow` for `days == 0` or a start before the
/// representable calendar.
pub fn time_window(now: DateTime<Utc>, days: u32) -> Result<TimeWindow, InsightError> {
    if days == 0 {
        return Err(InsightError::InvalidWindow("days must be at least 1".into()));
    }
    let since = TimeDelta::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| InsightError::InvalidWindow(format!("{days} days is out of range")))?;
    Ok(TimeWindow {
        since,
        until: now,
        days,
    })
}

/// Risk counts, mean health, and frequency tables for one window.
#[must_use]
pub fn summarize(
    organization_id: &str,
    window: TimeWindow,
    insights: &[StoredInsight],
) -> DashboardSummary {
    let mut risk = RiskCounts::default();
    let mut health = HealthMean::default();
    let mut findings_by_category: BTreeMap<String, u32> = BTreeMap::new();
    let mut conversations_by_source: BTreeMap<String, u32> = BTreeMap::new();

    for insight in insights {
        match insight.overall_risk {
            RiskLevel::High => risk.high += 1,
            RiskLevel::Medium => risk.medium += 1,
            RiskLevel::Low => risk.low += 1,
        }
        health.add(insight.health_score);
        *conversations_by_source
            .entry(insight.source_type.as_str().to_string())
            .or_default() += 1;
        for finding in &insight.findings {
            *findings_by_category
                .entry(finding.category.as_str().to_string())
                .or_default() += 1;
        }
    }

    DashboardSummary {
        organization_id: organization_id.to_string(),
        window,
        total_conversations: health.count,
        risk,
        average_health_score: health.mean(),
        findings_by_category,
        conversations_by_source,
    }
}

/// Sparse, ascending buckets. Empty buckets are omitted.
#[must_use]
pub fn trends(
    organization_id: &str,
    window: TimeWindow,
    group_by: GroupBy,
    insights: &[StoredInsight],
) -> TrendSeries {
    let mut buckets: BTreeMap<NaiveDate, (u32, HealthMean)> = BTreeMap::new();
    for insight in insights {
        let start = bucket_start(insight.timestamp.date_naive(), group_by);
        let (high_risk, health) = buckets.entry(start).or_default();
        if insight.overall_risk == RiskLevel::High {
            *high_risk += 1;
        }
        health.add(insight.health_score);
    }

    let buckets = buckets
        .into_iter()
        .map(|(start, (high_risk, health))| TrendBucket {
            bucket: bucket_key(start, group_by),
            bucket_start: start.and_time(NaiveTime::MIN).and_utc(),
            conversations: health.count,
            high_risk,
            average_health_score: health.mean(),
        })
        .collect();

    TrendSeries {
        organization_id: organization_id.to_string(),
        window,
        group_by,
        buckets,
    }
}

/// Per-topic occurrence counts, most frequent first, ties by topic name.
/// Findings without a topic are not counted.
#[must_use]
pub fn topic_breakdown(
    organization_id: &str,
    window: TimeWindow,
    insights: &[StoredInsight],
) -> TopicBreakdownResponse {
    let mut by_topic: BTreeMap<&str, TopicBreakdown> = BTreeMap::new();
    let findings = insights.iter().flat_map(|insight| &insight.findings);
    for finding in findings {
        let Some(topic) = finding.topic.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        let entry = by_topic.entry(topic).or_insert_with(|| TopicBreakdown {
            topic: topic.to_string(),
            occurrences: 0,
            high_severity: 0,
            by_category: BTreeMap::new(),
        });
        entry.occurrences += 1;
        if finding.severity.is_high() {
            entry.high_severity += 1;
        }
        *entry
            .by_category
            .entry(finding.category.as_str().to_string())
            .or_default() += 1;
    }

    let mut topics: Vec<TopicBreakdown> = by_topic.into_values().collect();
    topics.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.topic.cmp(&b.topic))
    });

    TopicBreakdownResponse {
        organization_id: organization_id.to_string(),
        window,
        topics,
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

fn bucket_start(date: NaiveDate, group_by: GroupBy) -> NaiveDate {
    let offset = match group_by {
        GroupBy::Day => 0,
        GroupBy::Week => date.weekday().num_days_from_monday(),
        GroupBy::Month => date.day0(),
    };
    date - Days::new(u64::from(offset))
}

fn bucket_key(start: NaiveDate, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Day => start.format("%Y-%m-%d").to_string(),
        GroupBy::Week => {
            let week = start.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        GroupBy::Month => start.format("%Y-%m").to_string(),
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct HealthMean {
    count: u32,
    total: f64,
}

impl HealthMean {
    fn add(&mut self, score: u8) {
        self.count += 1;
        self.total += f64::from(score);
    }

    /// Rounded to two decimals; `0.0` when empty.
    fn mean(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.total / f64::from(self.count) * 100.0).round() / 100.0
    }
}
