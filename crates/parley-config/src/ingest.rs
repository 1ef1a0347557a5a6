//! Extraction policy constants.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_body_max_chars() -> usize {
    1000
}

fn default_truncation_marker() -> String {
    String::from(" [truncated]")
}

const fn default_fallback_line_limit() -> usize {
    50
}

const fn default_max_label_chars() -> usize {
    30
}

/// Bounds applied by the message extractor.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct IngestConfig {
    /// Message bodies longer than this many characters are cut and suffixed
    /// with `truncation_marker`.
    #[serde(default = "default_body_max_chars")]
    pub body_max_chars: usize,

    #[serde(default = "default_truncation_marker")]
    pub truncation_marker: String,

    /// Lines scanned by the per-line `Name: message` fallback.
    #[serde(default = "default_fallback_line_limit")]
    pub fallback_line_limit: usize,

    /// Longest label the fallback accepts as a sender.
    #[serde(default = "default_max_label_chars")]
    pub max_label_chars: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            body_max_chars: default_body_max_chars(),
            truncation_marker: default_truncation_marker(),
            fallback_line_limit: default_fallback_line_limit(),
            max_label_chars: default_max_label_chars(),
        }
    }
}

impl IngestConfig {
    /// Reject bounds that would make every message empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero body cap, line limit, or label length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero_field = [
            ("ingest.body_max_chars", self.body_max_chars),
            ("ingest.fallback_line_limit", self.fallback_line_limit),
            ("ingest.max_label_chars", self.max_label_chars),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);

        if let Some((field, _)) = zero_field {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = IngestConfig::default();
        assert_eq!(config.body_max_chars, 1000);
        assert_eq!(config.truncation_marker, " [truncated]");
        assert_eq!(config.fallback_line_limit, 50);
        assert_eq!(config.max_label_chars, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_body_cap_is_rejected() {
        let config = IngestConfig {
            body_max_chars: 0,
            ..IngestConfig::default()
        };
        let err = config.validate().expect_err("zero cap must fail");
        assert!(err.to_string().contains("ingest.body_max_chars"));
    }
}
