//! # lead-schema
//!
//! JSON Schema registry for leaddesk request bodies.
//!
//! Payload types are defined in `lead-core` with `#[derive(JsonSchema)]`.
//! This crate builds their schemas once, compiles validators, and checks
//! incoming bodies at the API edge before anything reaches the store.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::{SchemaRegistry, schema_name_for};
