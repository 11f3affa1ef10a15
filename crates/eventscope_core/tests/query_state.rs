use eventscope_core::{
    decode_query, BackendQuery, QueryParams, QueryState, CLUSTER_LIST, EVENT_LIST,
};

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn state_round_trips_through_its_representation() {
    let mut state = QueryState::new(20);
    state.set_filter("search", "噪音扰民");
    state.set_filter("event_count_range", "3-5");
    state.set_page(3, 50);

    let restored = QueryState::from_params(&state.to_params(), &CLUSTER_LIST, 20);
    assert_eq!(restored, state);
}

#[test]
fn reserialization_is_idempotent() {
    let raw = params(&[("town", "新安街道"), ("page", "2"), ("level", "")]);
    let first = QueryState::from_params(&raw, &EVENT_LIST, 20).to_params();
    let second = QueryState::from_params(&first, &EVENT_LIST, 20).to_params();
    assert_eq!(first, second);
    assert_eq!(first, params(&[("town", "新安街道"), ("page", "2")]));
}

#[test]
fn defaults_are_omitted_from_representation() {
    let mut state = QueryState::new(20);
    state.set_filter("search", "  ");
    state.set_page(1, 20);
    assert!(state.to_params().is_empty());
    assert_eq!(state.to_query_string(), "");
}

#[test]
fn undeclared_keys_and_bad_pages_fall_back() {
    let raw = params(&[
        ("search", "abc"),
        ("utm_source", "mail"),
        ("page", "zero"),
        ("page_size", "0"),
    ]);
    let state = QueryState::from_params(&raw, &EVENT_LIST, 20);
    assert_eq!(state.filter("search"), Some("abc"));
    assert_eq!(state.filter("utm_source"), None);
    assert_eq!(state.page(), 1);
    assert_eq!(state.page_size(), 20);
}

#[test]
fn query_string_survives_the_address_bar() {
    let mut state = QueryState::new(20);
    state.set_filter("duration_range", "30天以上");
    state.set_filter("search", "a b&c");
    state.set_page(4, 20);

    let decoded = decode_query(&format!("?{}", state.to_query_string()));
    assert_eq!(QueryState::from_params(&decoded, &CLUSTER_LIST, 20), state);
}

#[test]
fn explicit_bound_overrides_bucket_side() {
    let raw = params(&[("event_count_range", "3-5"), ("min_event_count", "7")]);
    let state = QueryState::from_params(&raw, &CLUSTER_LIST, 20);
    let query = BackendQuery::from_state(&state, &CLUSTER_LIST);

    assert_eq!(query.get("min_event_count"), Some("7"));
    assert_eq!(query.get("max_event_count"), Some("5"));
    assert_eq!(query.get("event_count_range"), None);
}

#[test]
fn duration_bucket_maps_to_day_bounds() {
    let raw = params(&[("duration_range", "30天以上"), ("search", "x")]);
    let state = QueryState::from_params(&raw, &CLUSTER_LIST, 20);
    let query = BackendQuery::from_state(&state, &CLUSTER_LIST);

    assert_eq!(query.get("min_duration"), Some("30"));
    assert_eq!(query.get("max_duration"), None);
    assert_eq!(query.get("search"), Some("x"));
}

#[test]
fn unknown_bucket_sends_no_bounds() {
    let raw = params(&[("event_count_range", "100+")]);
    let state = QueryState::from_params(&raw, &CLUSTER_LIST, 20);
    let query = BackendQuery::from_state(&state, &CLUSTER_LIST);
    assert_eq!(query.filter_count(), 0);
}

#[test]
fn backend_pairs_end_with_pagination() {
    let raw = params(&[("search", "x"), ("page", "2")]);
    let state = QueryState::from_params(&raw, &EVENT_LIST, 20);
    let pairs = BackendQuery::from_state(&state, &EVENT_LIST).pairs();
    assert_eq!(
        pairs,
        vec![
            ("search".to_string(), "x".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page_size".to_string(), "20".to_string()),
        ]
    );
}
