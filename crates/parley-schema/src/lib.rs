//! # parley-schema
//!
//! JSON Schema generation, validation, and registry for Parley.
//!
//! Interchange types are defined in `parley-core` and `parley-taxonomy` with
//! `#[derive(JsonSchema)]`. This crate collects their schemas, validates
//! values coming back from the analysis collaborator, and backs the
//! `parley schema` command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
