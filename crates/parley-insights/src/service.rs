use chrono::{DateTime, Utc};
use parley_core::entities::StoredInsight;
use parley_core::enums::GroupBy;
use parley_core::responses::{DashboardSummary, TimeWindow, TopicBreakdownResponse, TrendSeries};

use crate::aggregate::{summarize, time_window, topic_breakdown, trends};
use crate::error::InsightError;
use crate::source::InsightSource;

/// Read-only, organization-scoped aggregation over an [`InsightSource`].
pub struct InsightAggregator<S> {
    source: S,
}

impl<S: InsightSource> InsightAggregator<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Summary of the last `days` days.
    ///
    /// # Errors
    ///
    /// See [`Self::get_dashboard_summary_at`].
    pub fn get_dashboard_summary(
        &self,
        organization_id: &str,
        days: u32,
    ) -> Result<DashboardSummary, InsightError> {
        self.get_dashboard_summary_at(Utc::now(), organization_id, days)
    }

    /// Summary of `[now - days, now]`.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::InvalidOrganization` for a blank id,
    /// `InsightError::InvalidWindow` for `days == 0`, or a source error.
    pub fn get_dashboard_summary_at(
        &self,
        now: DateTime<Utc>,
        organization_id: &str,
        days: u32,
    ) -> Result<DashboardSummary, InsightError> {
        let window = time_window(now, days)?;
        let insights = self.scoped(organization_id, &window)?;
        Ok(summarize(organization_id, window, &insights))
    }

    /// Trend buckets over the last `days` days.
    ///
    /// # Errors
    ///
    /// See [`Self::get_dashboard_summary_at`].
    pub fn get_trends(
        &self,
        organization_id: &str,
        days: u32,
        group_by: GroupBy,
    ) -> Result<TrendSeries, InsightError> {
        self.get_trends_at(Utc::now(), organization_id, days, group_by)
    }

    /// Trend buckets over `[now - days, now]`. An empty window yields no buckets.
    ///
    /// # Errors
    ///
    /// See [`Self::get_dashboard_summary_at`].
    pub fn get_trends_at(
        &self,
        now: DateTime<Utc>,
        organization_id: &str,
        days: u32,
        group_by: GroupBy,
    ) -> Result<TrendSeries, InsightError> {
        let window = time_window(now, days)?;
        let insights = self.scoped(organization_id, &window)?;
        Ok(trends(organization_id, window, group_by, &insights))
    }

    /// Topic breakdown over the last `days` days.
    ///
    /// # Errors
    ///
    /// See [`Self::get_dashboard_summary_at`].
    pub fn get_topic_breakdown(
        &self,
        organization_id: &str,
        days: u32,
    ) -> Result<TopicBreakdownResponse, InsightError> {
        self.get_topic_breakdown_at(Utc::now(), organization_id, days)
    }

    /// Topic breakdown over `[now - days, now]`.
    ///
    /// # Errors
    ///
    /// See [`Self::get_dashboard_summary_at`].
    pub fn get_topic_breakdown_at(
        &self,
        now: DateTime<Utc>,
        organization_id: &str,
        days: u32,
    ) -> Result<TopicBreakdownResponse, InsightError> {
        let window = time_window(now, days)?;
        let insights = self.scoped(organization_id, &window)?;
        Ok(topic_breakdown(organization_id, window, &insights))
    }

    fn scoped(
        &self,
        organization_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<StoredInsight>, InsightError> {
        if organization_id.trim().is_empty() {
            return Err(InsightError::InvalidOrganization(
                organization_id.to_string(),
            ));
        }
        let insights = self
            .source
            .insights_in_window(organization_id, window.since, window.until)?;
        tracing::debug!(
            org = organization_id,
            days = window.days,
            records = insights.len(),
            "aggregating insights"
        );
        Ok(insights)
    }
}
