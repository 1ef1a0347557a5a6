//! JSONL insight store.
//!
//! Appends `StoredInsight` records to per-organization
//! `{store_dir}/{organization_id}.jsonl` files. Uses
//! `serde_jsonlines::append_json_lines` for per-line appends. Records are
//! never rewritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parley_core::entities::StoredInsight;
use parley_schema::SchemaRegistry;

use crate::error::InsightError;
use crate::source::{InsightSource, in_window};

pub struct JsonlInsightStore {
    store_dir: PathBuf,
}

impl JsonlInsightStore {
    /// Create a store rooted at `store_dir`. The directory is created on first append.
    #[must_use]
    pub const fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    /// The directory where store files live.
    #[must_use]
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// File holding `organization_id`'s insights.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::InvalidOrganization` for ids that are blank or
    /// could escape the store directory.
    pub fn path_for(&self, organization_id: &str) -> Result<PathBuf, InsightError> {
        let valid = !organization_id.trim().is_empty()
            && organization_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !organization_id.starts_with('.');
        if !valid {
            return Err(InsightError::InvalidOrganization(
                organization_id.to_string(),
            ));
        }
        Ok(self.store_dir.join(format!("{organization_id}.jsonl")))
    }

    /// Append one insight to its organization's file.
    ///
    /// # Errors
    ///
    /// Returns `InsightError` if the organization id is invalid or the write fails.
    pub fn append(&self, insight: &StoredInsight) -> Result<(), InsightError> {
        let path = self.path_for(&insight.organization_id)?;
        std::fs::create_dir_all(&self.store_dir).map_err(|source| InsightError::Io {
            path: self.store_dir.clone(),
            source,
        })?;
        serde_jsonlines::append_json_lines(&path, [insight])
            .map_err(|source| InsightError::Io { path, source })?;
        tracing::debug!(id = %insight.id, org = %insight.organization_id, "appended insight");
        Ok(())
    }

    /// Append with schema validation. Validation is warn-only.
    ///
    /// # Errors
    ///
    /// Same as [`Self::append`]. Schema failures are logged, not returned.
    pub fn append_validated(
        &self,
        insight: &StoredInsight,
        schema: &SchemaRegistry,
    ) -> Result<(), InsightError> {
        let value = serde_json::to_value(insight)?;
        if let Err(e) = schema.validate("stored_insight", &value) {
            tracing::warn!("Insight validation failed for {}: {:?}", insight.id, e);
        }
        self.append(insight)
    }

    /// Every readable insight of `organization_id`, in file order.
    ///
    /// A missing file yields an empty list. Lines that fail to parse are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Io` for read failures other than bad lines.
    pub fn load(&self, organization_id: &str) -> Result<Vec<StoredInsight>, InsightError> {
        let path = self.path_for(organization_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let lines = serde_jsonlines::json_lines::<StoredInsight, _>(&path).map_err(|source| {
            InsightError::Io {
                path: path.clone(),
                source,
            }
        })?;

        let mut insights = Vec::new();
        for (index, line) in lines.enumerate() {
            match line {
                Ok(insight) => insights.push(insight),
                Err(e) if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping unreadable insight line"
                    );
                }
                Err(source) => return Err(InsightError::Io { path, source }),
            }
        }
        Ok(insights)
    }
}

impl InsightSource for JsonlInsightStore {
    fn insights_in_window(
        &self,
        organization_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<StoredInsight>, InsightError> {
        Ok(self
            .load(organization_id)?
            .into_iter()
            .filter(|insight| in_window(insight, organization_id, since, until))
            .collect())
    }
}
