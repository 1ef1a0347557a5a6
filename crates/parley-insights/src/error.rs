use std::path::PathBuf;

use parley_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("insight store io error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid organization id '{0}'")]
    InvalidOrganization(String),

    #[error("invalid window: {0}")]
    InvalidWindow(String),
}
