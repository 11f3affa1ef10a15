//! Declarations of the list views that share the query controller.

use crate::query::ranges::{RangeRule, DURATION_RULE, EVENT_COUNT_RULE};

/// Static description of one list view's filter form.
#[derive(Debug, PartialEq)]
pub struct ListDefinition {
    /// Short name used in logs.
    pub name: &'static str,
    /// Form keys that survive in the query-string representation.
    pub filter_keys: &'static [&'static str],
    /// Bucket/min/max groups resolved before calling the backend.
    pub range_rules: &'static [RangeRule],
    /// Prefix of the notice shown when a fetch fails.
    pub failure_context: &'static str,
}

impl ListDefinition {
    pub fn declares(&self, key: &str) -> bool {
        self.filter_keys.contains(&key)
    }
}

/// `GET /events`. `related_events` buckets are interpreted server-side.
pub static EVENT_LIST: ListDefinition = ListDefinition {
    name: "events",
    filter_keys: &["search", "town", "level", "category", "related_events"],
    range_rules: &[],
    failure_context: "加载事件列表失败",
};

/// `GET /cluster-list`.
pub static CLUSTER_LIST: ListDefinition = ListDefinition {
    name: "clusters",
    filter_keys: &[
        "search",
        "event_count_range",
        "duration_range",
        "min_event_count",
        "max_event_count",
        "min_duration",
        "max_duration",
    ],
    range_rules: &[EVENT_COUNT_RULE, DURATION_RULE],
    failure_context: "加载聚合事件列表失败",
};

/// `GET /person-analysis`.
pub static PERSON_ANALYSIS_LIST: ListDefinition = ListDefinition {
    name: "person_analysis",
    filter_keys: &["search", "role"],
    range_rules: &[],
    failure_context: "获取人员分析数据失败",
};
