//! Records exchanged with the record and person-registry services.
//!
//! # Responsibility
//! - Decode service JSON into typed, read-only records.
//! - Keep upstream free-text fields as raw strings; normalization lives in
//!   `crate::normalize`.
//!
//! # Invariants
//! - List endpoints share one `Page<T>` envelope.
//! - Nothing here mutates or re-derives upstream values.

pub mod page;
pub mod person;
pub mod record;
