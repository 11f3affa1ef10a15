//! Async collaborator contracts.
//!
//! Futures are `Send` so a UI host can drive them on any executor.

use crate::model::page::Page;
use crate::model::person::{PersonId, PersonRecord, PersonSearchRequest};
use crate::model::record::{
    ClusterDetail, ClusterFilterOptions, EventDetail, FilterOptions, PersonAnalysisDetail,
};
use crate::query::ranges::BackendQuery;
use crate::service::error::ServiceResult;
use std::future::Future;

/// Paged list endpoint for one row type.
pub trait ListSource<T> {
    fn fetch_page(
        &self,
        query: &BackendQuery,
    ) -> impl Future<Output = ServiceResult<Page<T>>> + Send;
}

/// Detail and option endpoints of the record service.
pub trait RecordService {
    fn event_detail(&self, event_id: &str)
        -> impl Future<Output = ServiceResult<EventDetail>> + Send;

    fn cluster_detail(
        &self,
        cluster_uid: &str,
    ) -> impl Future<Output = ServiceResult<ClusterDetail>> + Send;

    fn filter_options(&self) -> impl Future<Output = ServiceResult<FilterOptions>> + Send;

    fn cluster_filter_options(
        &self,
    ) -> impl Future<Output = ServiceResult<ClusterFilterOptions>> + Send;

    /// Role names offered by the person-analysis filter.
    fn person_roles(&self) -> impl Future<Output = ServiceResult<Vec<String>>> + Send;

    /// Aggregate and event history of one phone number.
    fn person_analysis_detail(
        &self,
        phone: &str,
    ) -> impl Future<Output = ServiceResult<PersonAnalysisDetail>> + Send;
}

/// Person registry search and detail.
pub trait PersonRegistry {
    fn search_people(
        &self,
        request: &PersonSearchRequest,
    ) -> impl Future<Output = ServiceResult<Page<PersonRecord>>> + Send;

    fn person_detail(
        &self,
        person_id: &PersonId,
    ) -> impl Future<Output = ServiceResult<PersonRecord>> + Send;
}
