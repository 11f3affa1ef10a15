//! Normalization of upstream free-text fields.
//!
//! # Responsibility
//! - Turn raw timestamps into `NormalizedInstant`s (`temporal`).
//! - Decode `;`/`|` delimited participant strings into entries (`entries`).
//! - Assemble per-record view models from both (`view`).
//!
//! # Invariants
//! - Parsing never fails loudly: unparseable input degrades to the raw string
//!   or to an empty entry list.
//! - All functions are pure.

pub mod entries;
pub mod temporal;
pub mod view;
