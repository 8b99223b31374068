//! # lead-core
//!
//! Core types shared across the leaddesk crates:
//! - Submission records and the payload shapes accepted by the API
//! - Status, category and form-type enums (status carries its state machine)
//! - Timestamp-derived ID helpers
//! - The popup form controller state machine
//! - Dashboard aggregation (counts and filters)
//! - Cross-cutting error types and API response bodies

pub mod dashboard;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod popup;
pub mod responses;
pub mod submission;
