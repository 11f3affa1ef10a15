//! Record normalization and query-state core for the event dashboard.
//! Every list and detail view consumes this crate the same way.

pub mod config;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod notice;
pub mod query;
pub mod request;
pub mod service;
pub mod xref;

pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::page::Page;
pub use model::person::{
    PersonCriteria, PersonId, PersonLookupResult, PersonRecord, PersonSearchRequest,
};
pub use model::record::{
    ClusterDetail, ClusterFilterOptions, ClusterSummary, EventDetail, EventRecord, FilterOptions,
    PersonAnalysisDetail, PersonAnalysisRecord, PersonEventEntry, TimelineEntry,
};
pub use normalize::entries::{
    parse_entries, EntryField, LabelSet, SemiStructuredEntry, CALLER_LABELS, PARTY_LABELS,
};
pub use normalize::temporal::{
    format_full, format_short, parse_timestamp, DisplayTime, NormalizedInstant,
};
pub use normalize::view::{
    ClusterDetailView, ClusterView, EventDetailView, EventView, PersonAnalysisView, PersonEventView,
};
pub use notice::{DetailState, Notice, NoticeKind};
pub use query::controller::{FetchOutcome, FetchTicket, QueryController};
pub use query::ranges::BackendQuery;
pub use query::state::{decode_query, encode_query, QueryParams, QueryState};
pub use query::views::{ListDefinition, CLUSTER_LIST, EVENT_LIST, PERSON_ANALYSIS_LIST};
pub use request::{Completion, Outcome, RequestToken};
pub use service::error::{ServiceError, ServiceResult};
pub use service::http::HttpClient;
pub use service::source::{ListSource, PersonRegistry, RecordService};
pub use xref::dispatcher::{CrossReferenceDispatcher, DetailTicket, SearchTicket};
pub use xref::seed_from_entries;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
