//! View models: raw records with time and participant fields normalized.
//!
//! Every list/detail page builds these the same way, so parsing happens once
//! per record instead of once per render.

use crate::model::record::{
    ClusterDetail, ClusterSummary, EventDetail, EventRecord, PersonAnalysisDetail, PersonEventEntry,
    TimelineEntry,
};
use crate::normalize::entries::{SemiStructuredEntry, CALLER_LABELS, PARTY_LABELS};
use crate::normalize::temporal::DisplayTime;

/// Placeholder rendered for absent values.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Row of the event list.
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub record: EventRecord,
    pub reported_at: DisplayTime,
    pub callers: Vec<SemiStructuredEntry>,
}

impl EventView {
    pub fn from_record(record: EventRecord) -> Self {
        let reported_at = DisplayTime::parse(record.reported_at.as_str());
        let callers = CALLER_LABELS.parse(record.caller_info.as_deref());
        Self {
            record,
            reported_at,
            callers,
        }
    }

    /// Caller column text: one rendered entry per line, or the placeholder.
    pub fn callers_text(&self) -> String {
        render_entries(&self.callers, |entry| CALLER_LABELS.display(entry))
    }
}

/// Event detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetailView {
    pub record: EventDetail,
    pub reported_at: DisplayTime,
    pub closed_at: Option<DisplayTime>,
    pub callers: Vec<SemiStructuredEntry>,
    pub parties: Vec<SemiStructuredEntry>,
}

impl EventDetailView {
    pub fn from_record(record: EventDetail) -> Self {
        Self {
            reported_at: DisplayTime::parse(record.reported_at.as_str()),
            closed_at: parse_optional_time(record.closed_at.as_deref()),
            callers: CALLER_LABELS.parse(record.caller_info.as_deref()),
            parties: PARTY_LABELS.parse(record.party_info.as_deref()),
            record,
        }
    }
}

/// Row of the cluster list.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterView {
    pub record: ClusterSummary,
    pub first_report: DisplayTime,
    pub last_report: DisplayTime,
}

impl ClusterView {
    pub fn from_record(record: ClusterSummary) -> Self {
        Self {
            first_report: DisplayTime::parse(record.first_report_time.as_str()),
            last_report: DisplayTime::parse(record.last_report_time.as_str()),
            record,
        }
    }

    /// Duration column text, see [`format_duration_days`].
    pub fn duration_text(&self) -> String {
        format_duration_days(self.record.duration_days)
    }
}

/// One timeline step of a cluster detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub entry: TimelineEntry,
    pub reported_at: DisplayTime,
    pub closed_at: Option<DisplayTime>,
    pub callers: Vec<SemiStructuredEntry>,
    pub parties: Vec<SemiStructuredEntry>,
}

/// Cluster detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDetailView {
    pub cluster_uid: String,
    pub description: String,
    pub participant_count: u32,
    pub duration_days: Option<f64>,
    pub first_report: DisplayTime,
    pub last_report: DisplayTime,
    pub timeline: Vec<TimelineView>,
}

impl ClusterDetailView {
    pub fn from_record(record: ClusterDetail) -> Self {
        let timeline = record
            .timeline
            .into_iter()
            .map(|entry| TimelineView {
                reported_at: DisplayTime::parse(entry.reported_at.as_str()),
                closed_at: parse_optional_time(entry.closed_at.as_deref()),
                callers: CALLER_LABELS.parse(entry.caller_info.as_deref()),
                parties: PARTY_LABELS.parse(entry.party_info.as_deref()),
                entry,
            })
            .collect();

        Self {
            first_report: DisplayTime::parse(record.first_report_time),
            last_report: DisplayTime::parse(record.last_report_time),
            cluster_uid: record.cluster_uid,
            description: record.description,
            participant_count: record.participant_count,
            duration_days: record.duration_days,
            timeline,
        }
    }

    /// Number of distinct callers and parties with a phone, across the timeline.
    pub fn distinct_phones(&self) -> usize {
        let mut phones: Vec<&str> = self
            .timeline
            .iter()
            .flat_map(|step| step.callers.iter().chain(step.parties.iter()))
            .filter_map(|entry| entry.phone.as_deref())
            .collect();
        phones.sort_unstable();
        phones.dedup();
        phones.len()
    }
}

/// One history row of the person-analysis detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonEventView {
    pub entry: PersonEventEntry,
    pub reported_at: DisplayTime,
    pub closed_at: Option<DisplayTime>,
}

impl PersonEventView {
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Resolution text, or `None` when upstream sent nothing usable.
    pub fn resolution(&self) -> Option<&str> {
        self.entry
            .resolution
            .as_deref()
            .filter(|value| !is_missing(value))
    }
}

/// Person-analysis detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonAnalysisView {
    pub record: PersonAnalysisDetail,
    pub events: Vec<PersonEventView>,
}

impl PersonAnalysisView {
    pub fn from_record(mut record: PersonAnalysisDetail) -> Self {
        let events = std::mem::take(&mut record.events)
            .into_iter()
            .map(|entry| PersonEventView {
                reported_at: DisplayTime::parse(entry.reported_at.as_str()),
                closed_at: parse_optional_time(entry.closed_at.as_deref()),
                entry,
            })
            .collect();
        Self { record, events }
    }

    pub fn name_text(&self) -> &str {
        text_or(self.record.name.as_deref(), "未知")
    }

    pub fn id_card_text(&self) -> &str {
        text_or(self.record.id_card.as_deref(), "未知")
    }

    pub fn name_candidates_text(&self) -> &str {
        text_or(self.record.name_candidates.as_deref(), "无")
    }

    pub fn id_candidates_text(&self) -> &str {
        text_or(self.record.id_candidates.as_deref(), "无")
    }
}

// Upstream serializes absent values as the literal `None`.
fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "None"
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|value| !is_missing(value)).unwrap_or(fallback)
}

fn parse_optional_time(raw: Option<&str>) -> Option<DisplayTime> {
    raw.filter(|value| !is_missing(value)).map(DisplayTime::parse)
}

fn render_entries<F>(entries: &[SemiStructuredEntry], render: F) -> String
where
    F: Fn(&SemiStructuredEntry) -> String,
{
    if entries.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    entries.iter().map(render).collect::<Vec<_>>().join("\n")
}

/// Day count as shown in the cluster list: `不到1天` under one day, else `N天`.
pub fn format_duration_days(days: Option<f64>) -> String {
    match days {
        Some(days) if !days.is_finite() => EMPTY_PLACEHOLDER.to_string(),
        Some(days) if days < 1.0 => "不到1天".to_string(),
        Some(days) => format!("{days}天"),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration_days;

    #[test]
    fn duration_wording_follows_the_cluster_list() {
        assert_eq!(format_duration_days(Some(0.26)), "不到1天");
        assert_eq!(format_duration_days(Some(1.0)), "1天");
        assert_eq!(format_duration_days(Some(2.0)), "2天");
        assert_eq!(format_duration_days(Some(12.46)), "12.46天");
        assert_eq!(format_duration_days(None), "-");
    }
}
