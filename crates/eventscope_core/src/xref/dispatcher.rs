//! Person lookup panel state.
//!
//! The panel is reusable from any list or detail page. Searches and detail
//! fetches are fenced independently, so a slow detail never blocks paging.

use crate::model::person::{
    PersonCriteria, PersonId, PersonLookupResult, PersonRecord, PersonSearchRequest,
};
use crate::normalize::entries::SemiStructuredEntry;
use crate::notice::Notice;
use crate::request::{Completion, Outcome, RequestFence, RequestToken};
use crate::service::source::PersonRegistry;
use log::{debug, info, warn};

const SEARCH_FAILURE: &str = "搜索失败";
const DETAIL_FAILURE: &str = "获取人员详情失败";

pub type SearchOutcome = Outcome<PersonLookupResult>;
pub type DetailOutcome = Outcome<PersonRecord>;

/// A registry search the panel wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: RequestToken,
    pub request: PersonSearchRequest,
}

impl SearchTicket {
    pub async fn execute<R: PersonRegistry>(self, registry: &R) -> SearchOutcome {
        let result = registry.search_people(&self.request).await;
        Outcome::new(self.token, result)
    }
}

/// A single-person fetch for the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub token: RequestToken,
    pub person_id: PersonId,
}

impl DetailTicket {
    pub async fn execute<R: PersonRegistry>(self, registry: &R) -> DetailOutcome {
        let result = registry.person_detail(&self.person_id).await;
        Outcome::new(self.token, result)
    }
}

/// Lookup panel: last criteria, current page of matches, detail modal.
#[derive(Debug)]
pub struct CrossReferenceDispatcher {
    page_size: u32,
    open: bool,
    criteria: PersonCriteria,
    search_fence: RequestFence,
    detail_fence: RequestFence,
    result: Option<PersonLookupResult>,
    detail: Option<PersonRecord>,
    notice: Option<Notice>,
}

impl CrossReferenceDispatcher {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            open: false,
            criteria: PersonCriteria::default(),
            search_fence: RequestFence::new(),
            detail_fence: RequestFence::new(),
            result: None,
            detail: None,
            notice: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Criteria of the last issued search (the seed right after `open`).
    pub fn criteria(&self) -> &PersonCriteria {
        &self.criteria
    }

    pub fn result(&self) -> Option<&PersonLookupResult> {
        self.result.as_ref()
    }

    pub fn detail(&self) -> Option<&PersonRecord> {
        self.detail.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.search_fence.in_flight()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Opens the panel with `seed`; non-blank seeds search immediately.
    pub fn open(&mut self, seed: PersonCriteria) -> Option<SearchTicket> {
        self.open = true;
        self.result = None;
        self.detail = None;
        self.notice = None;
        self.search_fence.invalidate();
        self.detail_fence.invalidate();

        if seed.is_blank() {
            self.criteria = seed;
            return None;
        }
        Some(self.search(seed, 1))
    }

    /// Opens the panel seeded from one parsed participant entry.
    pub fn open_for_entry(&mut self, entry: &SemiStructuredEntry) -> Option<SearchTicket> {
        self.open(PersonCriteria::from(entry))
    }

    /// Searches with `criteria`; blank fields are wildcards, never skipped.
    pub fn search(&mut self, criteria: PersonCriteria, page: u32) -> SearchTicket {
        let request = PersonSearchRequest::new(&criteria, page, self.page_size);
        self.criteria = criteria;
        let token = self.search_fence.issue();
        debug!(
            "event=person_search module=xref status=issued token={} page={} blank={}",
            token,
            request.page,
            self.criteria.is_blank()
        );
        SearchTicket { token, request }
    }

    /// Re-runs the last criteria on another page.
    pub fn change_page(&mut self, page: u32) -> SearchTicket {
        self.search(self.criteria.clone(), page)
    }

    pub fn complete_search(&mut self, outcome: SearchOutcome) -> Completion {
        if !self.search_fence.settle(outcome.token) {
            debug!(
                "event=person_search module=xref status=stale token={}",
                outcome.token
            );
            return Completion::Superseded;
        }
        match outcome.result {
            Ok(result) => {
                info!(
                    "event=person_search module=xref status=ok token={} total={} items={}",
                    outcome.token,
                    result.total,
                    result.items.len()
                );
                self.result = Some(result.with_page_size_fallback(self.page_size));
                self.notice = None;
                Completion::Applied
            }
            Err(err) => {
                warn!(
                    "event=person_search module=xref status=error token={} error={}",
                    outcome.token, err
                );
                let notice = Notice::from_error(SEARCH_FAILURE, &err);
                self.notice = Some(notice.clone());
                Completion::Failed(notice)
            }
        }
    }

    /// Fetches one person for the detail modal; the result list is untouched.
    pub fn fetch_detail(&mut self, person_id: PersonId) -> DetailTicket {
        let token = self.detail_fence.issue();
        debug!("event=person_detail module=xref status=issued token={token}");
        DetailTicket { token, person_id }
    }

    pub fn complete_detail(&mut self, outcome: DetailOutcome) -> Completion {
        if !self.detail_fence.settle(outcome.token) {
            return Completion::Superseded;
        }
        match outcome.result {
            Ok(person) => {
                self.detail = Some(person);
                Completion::Applied
            }
            Err(err) => {
                warn!(
                    "event=person_detail module=xref status=error token={} error={}",
                    outcome.token, err
                );
                let notice = Notice::from_error(DETAIL_FAILURE, &err);
                self.notice = Some(notice.clone());
                Completion::Failed(notice)
            }
        }
    }

    /// Closes the detail modal only.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_fence.invalidate();
    }

    /// Closes the panel and discards everything it owned.
    pub fn close(&mut self) {
        self.open = false;
        self.result = None;
        self.detail = None;
        self.notice = None;
        self.search_fence.invalidate();
        self.detail_fence.invalidate();
    }
}
