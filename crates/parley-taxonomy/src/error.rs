use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("unknown industry '{0}'")]
    UnknownIndustry(String),

    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("invalid {kind} key '{key}': {reason}")]
    InvalidKey {
        kind: &'static str,
        key: String,
        reason: String,
    },

    #[error("invalid rule condition '{0}': expected '*', 'always', or 'topic == <key>'")]
    InvalidCondition(String),

    #[error("io error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("overrides parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("overrides serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
