//! # parley-core
//!
//! Core types, ID prefixes, and error types for Parley.
//!
//! This crate provides the foundational types shared across all Parley crates:
//! - Conversation capsule entities (participants, messages, derived metadata)
//! - Finding and stored-insight records exchanged with the analysis collaborator
//! - Classification enums (source format, severity, risk, finding category)
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types
//! - Aggregation response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
