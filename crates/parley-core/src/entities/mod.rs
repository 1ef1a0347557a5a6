//! Entity structs for all Parley domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! interchange with the analysis collaborator and schema validation.

mod capsule;
mod insight;
mod message;
mod participant;
mod report;

pub use capsule::{CapsuleMetadata, ConversationCapsule};
pub use insight::StoredInsight;
pub use message::Message;
pub use participant::{DeclaredParticipant, Participant, fold_case};
pub use report::{AnalysisReport, GradedFinding, ReportedFinding};
