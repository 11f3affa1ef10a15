//! Event and cluster records as returned by the record service.
//!
//! Upstream column names are Chinese; they are mapped onto English field
//! names with `serde(rename)`. Free-text identity fields (`caller_info`,
//! `party_info`) and every time field stay raw until normalized.

use serde::{Deserialize, Serialize};

/// Row of `GET /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "事件编号")]
    pub event_id: String,
    #[serde(rename = "事件描述", default)]
    pub description: String,
    #[serde(rename = "镇街名称", default)]
    pub town: String,
    #[serde(rename = "事件级别", default)]
    pub level: String,
    #[serde(rename = "二级分类", default)]
    pub category: String,
    #[serde(rename = "上报时间", default)]
    pub reported_at: String,
    #[serde(rename = "EventUID", default)]
    pub cluster_uid: Option<String>,
    #[serde(default)]
    pub sequence_total: Option<u32>,
    #[serde(rename = "报警人信息", default)]
    pub caller_info: Option<String>,
}

impl EventRecord {
    /// Number of other events in the same cluster.
    pub fn related_count(&self) -> u32 {
        self.sequence_total.unwrap_or(0).saturating_sub(1)
    }
}

/// Body of `GET /events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(rename = "事件编号")]
    pub event_id: String,
    #[serde(rename = "事件描述", default)]
    pub description: String,
    #[serde(rename = "镇街名称", default)]
    pub town: String,
    #[serde(rename = "村社名称", default)]
    pub village: Option<String>,
    #[serde(rename = "事件级别", default)]
    pub level: String,
    #[serde(rename = "二级分类", default)]
    pub category: String,
    #[serde(rename = "上报时间", default)]
    pub reported_at: String,
    #[serde(rename = "办结时间", default)]
    pub closed_at: Option<String>,
    #[serde(rename = "处置结果", default)]
    pub resolution: Option<String>,
    #[serde(rename = "EventUID", default)]
    pub cluster_uid: Option<String>,
    #[serde(default)]
    pub sequence_total: Option<u32>,
    #[serde(default)]
    pub related_events_count: Option<u32>,
    #[serde(rename = "报警人信息", default)]
    pub caller_info: Option<String>,
    #[serde(rename = "当事人信息", default)]
    pub party_info: Option<String>,
}

/// Row of `GET /cluster-list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    #[serde(rename = "EventUID")]
    pub cluster_uid: String,
    #[serde(rename = "cluster_description", default)]
    pub description: String,
    #[serde(default)]
    pub record_count: u32,
    #[serde(default)]
    pub duration_days: Option<f64>,
    #[serde(default)]
    pub first_report_time: String,
    #[serde(default)]
    pub last_report_time: String,
}

/// One event inside a cluster timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(rename = "事件编号")]
    pub event_id: String,
    #[serde(rename = "事件描述", default)]
    pub description: String,
    #[serde(rename = "上报时间", default)]
    pub reported_at: String,
    #[serde(rename = "办结时间", default)]
    pub closed_at: Option<String>,
    #[serde(rename = "处置结果", default)]
    pub resolution: Option<String>,
    #[serde(rename = "报警人信息", default)]
    pub caller_info: Option<String>,
    #[serde(rename = "当事人信息", default)]
    pub party_info: Option<String>,
}

/// Body of `GET /clusters/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetail {
    #[serde(rename = "EventUID")]
    pub cluster_uid: String,
    #[serde(rename = "Event_description", default)]
    pub description: String,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub duration_days: Option<f64>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub first_report_time: String,
    #[serde(default)]
    pub last_report_time: String,
}

/// Body of `GET /filter-options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub towns: Vec<String>,
    pub levels: Vec<String>,
    pub categories: Vec<String>,
    pub related_event_options: Vec<String>,
}

/// Body of `GET /cluster-filter-options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterFilterOptions {
    pub event_count_ranges: Vec<String>,
    pub duration_ranges: Vec<String>,
}

/// Row of `GET /person-analysis`: one phone-keyed participant aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonAnalysisRecord {
    pub phone: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id_card: Option<String>,
    #[serde(default)]
    pub primary_role: Option<String>,
    #[serde(default)]
    pub event_count: u32,
}

/// One event in a participant's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEventEntry {
    #[serde(rename = "事件编号")]
    pub event_id: String,
    #[serde(rename = "事件描述", default)]
    pub description: String,
    #[serde(rename = "上报时间", default)]
    pub reported_at: String,
    /// Upstream writes the literal `None` for open events.
    #[serde(rename = "办结时间", default)]
    pub closed_at: Option<String>,
    #[serde(rename = "处置结果", default)]
    pub resolution: Option<String>,
    /// Role this participant played in the event.
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `GET /person-analysis/{phone}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonAnalysisDetail {
    pub phone: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id_card: Option<String>,
    #[serde(default)]
    pub primary_role: Option<String>,
    #[serde(default)]
    pub event_count: u32,
    /// Other names seen with this phone, as one display string.
    #[serde(default)]
    pub name_candidates: Option<String>,
    #[serde(default)]
    pub id_candidates: Option<String>,
    #[serde(default)]
    pub events: Vec<PersonEventEntry>,
}
