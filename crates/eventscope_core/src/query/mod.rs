//! Filter/pagination state for list views.
//!
//! # Responsibility
//! - Own one view's `QueryState` and keep it in sync with the shareable
//!   query-string representation (`state`).
//! - Expand range buckets into the query the backend expects (`ranges`).
//! - Issue fenced fetches and apply only the latest response (`controller`).
//!
//! # Invariants
//! - Empty filter values are never stored or serialized.
//! - `page >= 1` and `page_size >= 1` at all times.

pub mod controller;
pub mod ranges;
pub mod state;
pub mod views;
