//! Collaborator services: the record service and the person registry.
//!
//! # Responsibility
//! - Define the async seams (`ListSource`, `RecordService`, `PersonRegistry`)
//!   that controllers and the lookup panel are generic over.
//! - Provide the `reqwest`-backed implementation of all three.
//!
//! # Invariants
//! - Detail endpoints report a missing record as `ServiceError::NotFound`,
//!   distinct from transport and status failures.

pub mod error;
pub mod http;
pub mod source;
