//! Range buckets and the effective backend query.
//!
//! A range filter arrives either as a named bucket (`event_count_range=3-5`)
//! or as explicit bounds (`min_event_count=7`). Buckets expand through a
//! fixed table; an explicit bound replaces the bucket's bound on the same
//! side. Bucket keys are never forwarded to the backend.

use crate::query::state::QueryState;
use crate::query::views::ListDefinition;
use log::warn;
use std::collections::BTreeMap;

/// A named discrete range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub label: &'static str,
    pub min: Option<f64>,
    /// `None` means open-ended.
    pub max: Option<f64>,
}

/// One bucket key with its min/max override keys and expansion table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule {
    pub bucket_key: &'static str,
    pub min_key: &'static str,
    pub max_key: &'static str,
    pub buckets: &'static [Bucket],
}

pub const EVENT_COUNT_RULE: RangeRule = RangeRule {
    bucket_key: "event_count_range",
    min_key: "min_event_count",
    max_key: "max_event_count",
    buckets: &[
        Bucket {
            label: "2",
            min: Some(2.0),
            max: Some(2.0),
        },
        Bucket {
            label: "3-5",
            min: Some(3.0),
            max: Some(5.0),
        },
        Bucket {
            label: "6-10",
            min: Some(6.0),
            max: Some(10.0),
        },
        Bucket {
            label: "10+",
            min: Some(11.0),
            max: None,
        },
    ],
};

/// Durations are in days.
pub const DURATION_RULE: RangeRule = RangeRule {
    bucket_key: "duration_range",
    min_key: "min_duration",
    max_key: "max_duration",
    buckets: &[
        Bucket {
            label: "0-1天",
            min: Some(0.0),
            max: Some(1.0),
        },
        Bucket {
            label: "1-7天",
            min: Some(1.0),
            max: Some(7.0),
        },
        Bucket {
            label: "7-30天",
            min: Some(7.0),
            max: Some(30.0),
        },
        Bucket {
            label: "30天以上",
            min: Some(30.0),
            max: None,
        },
    ],
};

impl RangeRule {
    pub fn bucket(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }

    fn owns(&self, key: &str) -> bool {
        key == self.bucket_key || key == self.min_key || key == self.max_key
    }

    /// Effective `(min, max)` for this rule; explicit bounds win per side.
    pub fn resolve(&self, filters: &BTreeMap<String, String>) -> (Option<f64>, Option<f64>) {
        let (mut min, mut max) = match filters.get(self.bucket_key) {
            Some(label) => match self.bucket(label) {
                Some(bucket) => (bucket.min, bucket.max),
                None => {
                    warn!(
                        "event=unknown_bucket module=query status=ignored key={}",
                        self.bucket_key
                    );
                    (None, None)
                }
            },
            None => (None, None),
        };
        if let Some(value) = explicit_bound(filters, self.min_key) {
            min = Some(value);
        }
        if let Some(value) = explicit_bound(filters, self.max_key) {
            max = Some(value);
        }
        (min, max)
    }
}

fn explicit_bound(filters: &BTreeMap<String, String>, key: &str) -> Option<f64> {
    let raw = filters.get(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!("event=invalid_bound module=query status=ignored key={key}");
            None
        }
    }
}

/// Decimal text without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parameters actually sent to a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendQuery {
    filters: BTreeMap<String, String>,
    page: u32,
    page_size: u32,
}

impl BackendQuery {
    /// Plain filters plus resolved range bounds for `definition`.
    pub fn from_state(state: &QueryState, definition: &ListDefinition) -> Self {
        let rules = definition.range_rules;
        let mut filters: BTreeMap<String, String> = state
            .filters()
            .iter()
            .filter(|(key, _)| !rules.iter().any(|rule| rule.owns(key)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for rule in rules {
            let (min, max) = rule.resolve(state.filters());
            if let Some(min) = min {
                filters.insert(rule.min_key.to_string(), format_number(min));
            }
            if let Some(max) = max {
                filters.insert(rule.max_key.to_string(), format_number(max));
            }
        }

        Self {
            filters,
            page: state.page(),
            page_size: state.page_size(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Filters followed by `page` and `page_size`, as query pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("page_size".to_string(), self.page_size.to_string()));
        pairs
    }
}
