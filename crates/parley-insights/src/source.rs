use chrono::{DateTime, Utc};
use parley_core::entities::StoredInsight;

use crate::error::InsightError;

/// Read-only access to stored insights, scoped by organization.
pub trait InsightSource {
    /// Every insight of `organization_id` with `since <= timestamp <= until`.
    ///
    /// # Errors
    ///
    /// Backing-store failures only. An organization with no data yields an
    /// empty list.
    fn insights_in_window(
        &self,
        organization_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<StoredInsight>, InsightError>;
}

/// Whether `insight` belongs to `organization_id` and falls in `[since, until]`.
pub(crate) fn in_window(
    insight: &StoredInsight,
    organization_id: &str,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> bool {
    insight.organization_id == organization_id
        && insight.timestamp >= since
        && insight.timestamp <= until
}

impl InsightSource for Vec<StoredInsight> {
    fn insights_in_window(
        &self,
        organization_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<StoredInsight>, InsightError> {
        Ok(self
            .iter()
            .filter(|insight| in_window(insight, organization_id, since, until))
            .cloned()
            .collect())
    }
}
