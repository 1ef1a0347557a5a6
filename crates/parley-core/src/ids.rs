//! ID prefixes and formatting helpers.
//!
//! Participant and message ids are sequential and only stable within one
//! capsule. Capsule and insight ids carry a hex suffix.

pub const PREFIX_CAPSULE: &str = "cap";
pub const PREFIX_INSIGHT: &str = "ins";
pub const PREFIX_PARTICIPANT: &str = "p";
pub const PREFIX_MESSAGE: &str = "m";

/// `cap-1a2b3c4d5e6f` style id.
#[must_use]
pub fn format_id(prefix: &str, suffix: &str) -> String {
    format!("{prefix}-{suffix}")
}

/// `p1`, `m12` style id. `index` is zero-based.
#[must_use]
pub fn sequential_id(prefix: &str, index: usize) -> String {
    format!("{prefix}{}", index + 1)
}
