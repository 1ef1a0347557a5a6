//! # parley-ingest
//!
//! Turns raw conversational text into a [`ConversationCapsule`] without any
//! semantic model:
//!
//! ```text
//! raw text ─▶ resolve_format ─▶ discover_participants ─▶ extract ─▶ assemble ─▶ capsule
//! ```
//!
//! Every stage is pure and infallible. Identical input always yields an
//! identical capsule, including its id.

pub mod assemble;
pub mod detect;
pub mod extract;
pub mod names;
mod patterns;

pub use assemble::assemble;
pub use detect::{detect, resolve_format};
pub use extract::{ExtractedMessage, Extraction, extract};
pub use names::discover_participants;

use parley_config::IngestConfig;
use parley_core::entities::{ConversationCapsule, DeclaredParticipant};
use parley_core::enums::FormatHint;

/// Run the full ingestion pipeline over one conversation.
#[must_use]
pub fn ingest(
    text: &str,
    hint: Option<FormatHint>,
    declared: &[DeclaredParticipant],
    config: &IngestConfig,
) -> ConversationCapsule {
    let format = resolve_format(text, hint);
    let participants = discover_participants(text, declared);
    let extraction = extract(text, format, &participants, config);
    assemble(&participants, extraction, format)
}
