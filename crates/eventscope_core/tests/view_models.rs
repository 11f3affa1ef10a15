use eventscope_core::normalize::view::{format_duration_days, EMPTY_PLACEHOLDER};
use eventscope_core::{
    ClusterDetail, ClusterDetailView, ClusterSummary, ClusterView, DetailState, EventDetail,
    EventDetailView, EventRecord, EventView, PersonAnalysisDetail, PersonAnalysisView,
    ServiceError,
};
use serde_json::json;

#[test]
fn event_row_decodes_upstream_columns_and_normalizes() {
    let record: EventRecord = serde_json::from_value(json!({
        "事件编号": "E-001",
        "事件描述": "邻里噪音纠纷",
        "镇街名称": "新安街道",
        "事件级别": "一般",
        "二级分类": "矛盾纠纷",
        "上报时间": "26/5/25 8:20",
        "EventUID": "GLW-7",
        "sequence_total": 3,
        "报警人信息": "姓名:甲|电话:111;姓名:乙|电话:222"
    }))
    .unwrap();
    assert_eq!(record.related_count(), 2);

    let view = EventView::from_record(record);
    assert_eq!(view.reported_at.short(), "05-26 08:20");
    assert_eq!(view.callers.len(), 2);
    assert_eq!(view.callers_text(), "姓名: 甲 | 电话: 111\n姓名: 乙 | 电话: 222");
}

#[test]
fn event_row_without_callers_renders_placeholder() {
    let record: EventRecord = serde_json::from_value(json!({
        "事件编号": "E-002",
        "上报时间": "unknown"
    }))
    .unwrap();
    let view = EventView::from_record(record);
    assert_eq!(view.callers_text(), EMPTY_PLACEHOLDER);
    assert_eq!(view.reported_at.full(), "unknown");
    assert_eq!(view.record.related_count(), 0);
}

#[test]
fn event_detail_splits_callers_and_parties() {
    let detail: EventDetail = serde_json::from_value(json!({
        "事件编号": "E-003",
        "上报时间": "2025-05-26 08:20:00",
        "办结时间": "",
        "报警人信息": "姓名:甲|电话:111",
        "当事人信息": "角色:报警人|姓名:甲|电话:111;角色:对方|姓名:丙"
    }))
    .unwrap();
    let view = EventDetailView::from_record(detail);
    assert!(view.closed_at.is_none());
    assert_eq!(view.callers.len(), 1);
    assert_eq!(view.parties[1].role.as_deref(), Some("对方"));
    assert_eq!(view.parties[1].phone, None);
}

#[test]
fn cluster_row_formats_duration_and_times() {
    let summary: ClusterSummary = serde_json::from_value(json!({
        "EventUID": "GLW-7",
        "cluster_description": "同一地址多次报警",
        "record_count": 4,
        "duration_days": 12.46,
        "first_report_time": "1/5/25 9:00",
        "last_report_time": "13/5/25 20:05"
    }))
    .unwrap();
    let view = ClusterView::from_record(summary);
    assert_eq!(view.duration_text(), "12.46天");
    assert_eq!(view.first_report.full(), "2025-05-01 09:00:00");
    assert_eq!(view.last_report.short(), "05-13 20:05");
    assert_eq!(format_duration_days(None), EMPTY_PLACEHOLDER);
}

#[test]
fn cluster_detail_counts_distinct_phones_across_timeline() {
    let detail: ClusterDetail = serde_json::from_value(json!({
        "EventUID": "GLW-7",
        "Event_description": "同一地址多次报警",
        "participant_count": 3,
        "timeline": [
            {
                "事件编号": "E-1",
                "上报时间": "1/5/25 9:00",
                "报警人信息": "姓名:甲|电话:111",
                "当事人信息": "角色:对方|姓名:丙|电话:333"
            },
            {
                "事件编号": "E-2",
                "上报时间": "13/5/25 20:05",
                "办结时间": "14/5/25 10:00",
                "报警人信息": "姓名:甲|电话:111"
            }
        ]
    }))
    .unwrap();
    let view = ClusterDetailView::from_record(detail);
    assert_eq!(view.timeline.len(), 2);
    assert_eq!(view.distinct_phones(), 2);
    let closed = view.timeline[1].closed_at.as_ref().expect("closed time");
    assert_eq!(closed.full(), "2025-05-14 10:00:00");
}

#[test]
fn person_analysis_history_normalizes_each_event() {
    let detail: PersonAnalysisDetail = serde_json::from_value(json!({
        "phone": "13800000000",
        "name": "张三",
        "primary_role": "报警人",
        "event_count": 2,
        "name_candidates": "张三,张叁",
        "events": [
            {
                "事件编号": "E-1",
                "事件描述": "噪音",
                "上报时间": "26/5/25 8:20",
                "办结时间": "27/5/25 9:05",
                "处置结果": "已调解",
                "role": "报警人"
            },
            {
                "事件编号": "E-2",
                "上报时间": "2025-06-01 21:40:00",
                "办结时间": "None",
                "处置结果": "None",
                "role": "对方"
            }
        ]
    }))
    .unwrap();

    let view = PersonAnalysisView::from_record(detail);
    assert_eq!(view.name_text(), "张三");
    assert_eq!(view.id_card_text(), "未知");
    assert_eq!(view.name_candidates_text(), "张三,张叁");
    assert_eq!(view.id_candidates_text(), "无");
    assert!(view.record.events.is_empty());

    let first = &view.events[0];
    assert_eq!(first.reported_at.full(), "2025-05-26 08:20:00");
    assert_eq!(first.reported_at.short(), "05-26 08:20");
    assert!(first.is_closed());
    assert_eq!(first.closed_at.as_ref().map(|t| t.short()).as_deref(), Some("05-27 09:05"));
    assert_eq!(first.resolution(), Some("已调解"));

    let second = &view.events[1];
    assert_eq!(second.reported_at.short(), "06-01 21:40");
    assert!(!second.is_closed());
    assert_eq!(second.resolution(), None);
    assert_eq!(second.entry.role.as_deref(), Some("对方"));
}

#[test]
fn detail_state_maps_not_found_to_its_own_state() {
    let state: DetailState<EventDetailView> = DetailState::from_result(
        "获取事件详情失败",
        Err(ServiceError::NotFound("events/E-404".to_string())),
    );
    assert_eq!(state, DetailState::NotFound);

    let state: DetailState<u32> = DetailState::from_result(
        "获取事件详情失败",
        Err(ServiceError::Transport("timeout".to_string())),
    );
    match state {
        DetailState::Failed(notice) => assert!(notice.message.starts_with("获取事件详情失败: ")),
        other => panic!("expected failure, got {other:?}"),
    }
}
