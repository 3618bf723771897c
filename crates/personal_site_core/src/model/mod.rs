//! Wire/domain models for the three site resources.
//!
//! # Responsibility
//! - Define the JSON shapes exchanged with clients.
//! - Own per-entity structural validation.
//!
//! # Invariants
//! - Request payloads reject unknown fields.
//! - Validation returns every failing field, never just the first one.
//! - Timestamps travel as RFC 3339 strings and are stored as epoch ms.

pub mod article;
pub mod lesson;
pub mod validation;
pub mod value_sort;
pub mod wire_time;
