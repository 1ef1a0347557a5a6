//! Insight store location and aggregation defaults.

use std::path::PathBuf;

use parley_core::enums::GroupBy;
use serde::{Deserialize, Serialize};

fn default_store_dir() -> PathBuf {
    PathBuf::from(".parley/insights")
}

const fn default_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InsightsConfig {
    /// Directory holding one `{organization_id}.jsonl` file per organization.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// Window length used when `--days` is not given.
    #[serde(default = "default_days")]
    pub default_days: u32,

    #[serde(default)]
    pub default_group_by: GroupBy,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            default_days: default_days(),
            default_group_by: GroupBy::Day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = InsightsConfig::default();
        assert_eq!(config.store_dir, PathBuf::from(".parley/insights"));
        assert_eq!(config.default_days, 30);
        assert_eq!(config.default_group_by, GroupBy::Day);
    }
}
