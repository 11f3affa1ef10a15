//! Query-state controller for one list view.
//!
//! # Responsibility
//! - Own the view's `QueryState`, its serialized location and the cached page.
//! - Turn every state change into a fenced [`FetchTicket`]; the host runs the
//!   ticket against a [`ListSource`] and hands the outcome back.
//!
//! # Invariants
//! - Each state change issues exactly one ticket and supersedes the previous.
//! - Only the outcome of the latest ticket reaches `results`; older ones are
//!   dropped whatever their arrival order.
//! - A failed latest fetch leaves the previous page in place and raises a notice.
//! - `location()` always equals `state().to_params()`.

use crate::model::page::Page;
use crate::notice::Notice;
use crate::query::ranges::BackendQuery;
use crate::query::state::{QueryParams, QueryState};
use crate::query::views::ListDefinition;
use crate::request::{Completion, Outcome, RequestFence, RequestToken};
use crate::service::source::ListSource;
use log::{debug, info, warn};

/// Outcome of running a [`FetchTicket`].
pub type FetchOutcome<T> = Outcome<Page<T>>;

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub query: BackendQuery,
}

impl FetchTicket {
    /// Runs the fetch; pass the result to [`QueryController::complete`].
    pub async fn execute<T, S>(self, source: &S) -> FetchOutcome<T>
    where
        S: ListSource<T>,
    {
        let result = source.fetch_page(&self.query).await;
        Outcome::new(self.token, result)
    }
}

/// Single source of truth for one list view.
#[derive(Debug)]
pub struct QueryController<T> {
    definition: &'static ListDefinition,
    state: QueryState,
    location: QueryParams,
    fence: RequestFence,
    results: Option<Page<T>>,
    notice: Option<Notice>,
}

impl<T> QueryController<T> {
    pub fn new(definition: &'static ListDefinition, default_page_size: u32) -> Self {
        let state = QueryState::new(default_page_size);
        Self {
            definition,
            location: state.to_params(),
            state,
            fence: RequestFence::new(),
            results: None,
            notice: None,
        }
    }

    pub fn definition(&self) -> &'static ListDefinition {
        self.definition
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Current shareable representation of the state.
    pub fn location(&self) -> &QueryParams {
        &self.location
    }

    pub fn results(&self) -> Option<&Page<T>> {
        self.results.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.fence.in_flight()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns and clears the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Hydrates filters and pagination from a representation, then fetches.
    pub fn load(&mut self, params: &QueryParams) -> FetchTicket {
        self.state =
            QueryState::from_params(params, self.definition, self.state.default_page_size());
        self.issue("load")
    }

    /// Merges `values` into the filters (blank removes), back to page 1.
    ///
    /// Keys the view does not declare are ignored.
    pub fn apply_filters<I, K, V>(&mut self, values: I) -> FetchTicket
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in values {
            let key = key.as_ref();
            if self.definition.declares(key) {
                self.state.set_filter(key, value.as_ref());
            } else {
                warn!(
                    "event=undeclared_filter module=query status=ignored view={} key={}",
                    self.definition.name, key
                );
            }
        }
        let page_size = self.state.page_size();
        self.state.set_page(1, page_size);
        self.issue("apply_filters")
    }

    /// Replaces every filter with a single `search` value.
    pub fn quick_search(&mut self, text: &str) -> FetchTicket {
        self.state.clear_filters();
        self.apply_filters([("search", text)])
    }

    /// Clears all filters and returns to page 1; page size is kept.
    pub fn reset(&mut self) -> FetchTicket {
        self.state.clear_filters();
        let page_size = self.state.page_size();
        self.state.set_page(1, page_size);
        self.issue("reset")
    }

    /// Moves to another page without touching filters.
    pub fn change_page(&mut self, page: u32, page_size: u32) -> FetchTicket {
        self.state.set_page(page, page_size);
        self.issue("change_page")
    }

    /// Applies an outcome if it belongs to the latest ticket.
    pub fn complete(&mut self, outcome: FetchOutcome<T>) -> Completion {
        if !self.fence.settle(outcome.token) {
            debug!(
                "event=query_fetch module=query status=stale view={} token={}",
                self.definition.name, outcome.token
            );
            return Completion::Superseded;
        }

        match outcome.result {
            Ok(page) => {
                let page = page.with_page_size_fallback(self.state.page_size());
                info!(
                    "event=query_fetch module=query status=ok view={} token={} total={} items={}",
                    self.definition.name,
                    outcome.token,
                    page.total,
                    page.items.len()
                );
                if page.page >= 1 && page.page != self.state.page() {
                    let page_size = self.state.page_size();
                    self.state.set_page(page.page, page_size);
                    self.location = self.state.to_params();
                }
                self.results = Some(page);
                self.notice = None;
                Completion::Applied
            }
            Err(err) => {
                warn!(
                    "event=query_fetch module=query status=error view={} token={} error={}",
                    self.definition.name, outcome.token, err
                );
                let notice = Notice::from_error(self.definition.failure_context, &err);
                self.notice = Some(notice.clone());
                Completion::Failed(notice)
            }
        }
    }

    fn issue(&mut self, cause: &'static str) -> FetchTicket {
        self.location = self.state.to_params();
        let token = self.fence.issue();
        let query = BackendQuery::from_state(&self.state, self.definition);
        debug!(
            "event=query_fetch module=query status=issued view={} cause={} token={} page={} filters={}",
            self.definition.name,
            cause,
            token,
            query.page(),
            query.filter_count()
        );
        FetchTicket { token, query }
    }
}
