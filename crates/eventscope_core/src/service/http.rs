//! `reqwest` client for the record service and the person registry.
//!
//! # Endpoints
//! - `GET /events`, `/cluster-list`, `/person-analysis` (paged lists)
//! - `GET /events/{id}`, `/clusters/{uid}`, `/person-analysis/{phone}` (details)
//! - `GET /filter-options`, `/cluster-filter-options`, `/person-analysis/roles`
//! - `POST /people/search`, `GET /people/{person_id}`
//!
//! Path segments are percent-encoded; list queries are sent as given.

use crate::config::ClientConfig;
use crate::model::page::Page;
use crate::model::person::{PersonId, PersonRecord, PersonSearchRequest};
use crate::model::record::{
    ClusterDetail, ClusterFilterOptions, ClusterSummary, EventDetail, EventRecord, FilterOptions,
    PersonAnalysisDetail, PersonAnalysisRecord,
};
use crate::query::ranges::BackendQuery;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::source::{ListSource, PersonRegistry, RecordService};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Shared HTTP client; cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpClient {
    /// Builds a client from a config; the config is validated first.
    pub fn new(config: ClientConfig) -> ServiceResult<Self> {
        let config = config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` joined with the given path segments, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &BackendQuery,
    ) -> ServiceResult<Page<T>> {
        let request = self.http.get(self.endpoint(&[path])).query(&query.pairs());
        let page: Page<T> = self.send(request, None).await?;
        Ok(page.with_page_size_fallback(query.page_size()))
    }

    async fn detail<T: DeserializeOwned>(&self, path: &str, id: &str) -> ServiceResult<T> {
        let request = self.http.get(self.endpoint(&[path, id]));
        self.send(request, Some(format!("{path}/{id}"))).await
    }

    async fn options<T: DeserializeOwned>(&self, segments: &[&str]) -> ServiceResult<T> {
        let request = self.http.get(self.endpoint(segments));
        self.send(request, None).await
    }

    /// Sends and decodes; `missing` names the record when 404 means not-found.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        missing: Option<String>,
    ) -> ServiceResult<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!(
            "event=http_response module=service status={} url_path={}",
            status.as_u16(),
            response.url().path()
        );

        if status == StatusCode::NOT_FOUND {
            if let Some(what) = missing {
                return Err(ServiceError::NotFound(what));
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "event=http_error module=service status={} body_len={}",
                status.as_u16(),
                body.len()
            );
            return Err(ServiceError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// FastAPI-style `{"detail": ...}` message, else the capped raw body.
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }
    body.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

impl ListSource<EventRecord> for HttpClient {
    async fn fetch_page(&self, query: &BackendQuery) -> ServiceResult<Page<EventRecord>> {
        self.list("events", query).await
    }
}

impl ListSource<ClusterSummary> for HttpClient {
    async fn fetch_page(&self, query: &BackendQuery) -> ServiceResult<Page<ClusterSummary>> {
        self.list("cluster-list", query).await
    }
}

impl ListSource<PersonAnalysisRecord> for HttpClient {
    async fn fetch_page(&self, query: &BackendQuery) -> ServiceResult<Page<PersonAnalysisRecord>> {
        self.list("person-analysis", query).await
    }
}

impl RecordService for HttpClient {
    async fn event_detail(&self, event_id: &str) -> ServiceResult<EventDetail> {
        self.detail("events", event_id).await
    }

    async fn cluster_detail(&self, cluster_uid: &str) -> ServiceResult<ClusterDetail> {
        self.detail("clusters", cluster_uid).await
    }

    async fn filter_options(&self) -> ServiceResult<FilterOptions> {
        self.options(&["filter-options"]).await
    }

    async fn cluster_filter_options(&self) -> ServiceResult<ClusterFilterOptions> {
        self.options(&["cluster-filter-options"]).await
    }

    async fn person_roles(&self) -> ServiceResult<Vec<String>> {
        self.options(&["person-analysis", "roles"]).await
    }

    async fn person_analysis_detail(&self, phone: &str) -> ServiceResult<PersonAnalysisDetail> {
        self.detail("person-analysis", phone).await
    }
}

impl PersonRegistry for HttpClient {
    async fn search_people(
        &self,
        request: &PersonSearchRequest,
    ) -> ServiceResult<Page<PersonRecord>> {
        let builder = self
            .http
            .post(self.endpoint(&["people", "search"]))
            .json(request);
        let page: Page<PersonRecord> = self.send(builder, None).await?;
        Ok(page.with_page_size_fallback(request.page_size))
    }

    async fn person_detail(&self, person_id: &PersonId) -> ServiceResult<PersonRecord> {
        self.detail("people", person_id.as_str()).await
    }
}
