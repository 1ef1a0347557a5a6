//! Cross-cutting error types for Parley.
//!
//! Domain-specific errors (e.g., `TaxonomyError`, `InsightError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Parley crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
