use super::*;

fn record(value: serde_json::Value) -> SessionRecord {
    serde_json::from_value(value).expect("session record")
}

// =============================================================
// SessionSummary
// =============================================================

#[test]
fn summary_uses_display_title_and_counts_messages() {
    let summary = SessionSummary::from(&record(serde_json::json!({
        "id": 4,
        "created_at": "2024-05-01T12:00:00",
        "messages": [{ "id": 1, "sender": "user", "content": "hi" }]
    })));
    assert_eq!(summary.id, 4);
    assert_eq!(summary.title, "Chat #4");
    assert_eq!(summary.message_count, 1);
    assert!(summary.created_at.is_some());
}

// =============================================================
// Refresh sequencing
// =============================================================

#[test]
fn apply_list_sorts_newest_first() {
    let mut state = SessionsState::default();
    let seq = state.request_refresh();
    assert!(state.loading);
    let records = vec![
        record(serde_json::json!({ "id": 1, "created_at": "2024-05-01T10:00:00" })),
        record(serde_json::json!({ "id": 2, "created_at": "2024-05-02T10:00:00" })),
        record(serde_json::json!({ "id": 3 })),
    ];
    assert!(state.apply_list(seq, &records));
    let ids = state.items.iter().map(|s| s.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 1, 3]);
    assert!(!state.loading);
}

#[test]
fn stale_list_is_ignored() {
    let mut state = SessionsState::default();
    let old = state.request_refresh();
    let new = state.request_refresh();
    assert!(!state.apply_list(old, &[record(serde_json::json!({ "id": 9 }))]));
    assert!(state.items.is_empty());
    assert!(state.loading);
    assert!(state.apply_list(new, &[]));
    assert!(!state.loading);
}

#[test]
fn apply_error_keeps_previous_items() {
    let mut state = SessionsState::default();
    let seq = state.request_refresh();
    state.apply_list(seq, &[record(serde_json::json!({ "id": 5 }))]);
    let seq = state.request_refresh();
    assert!(state.apply_error(seq, "network error: offline".to_owned()));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.error.as_deref(), Some("network error: offline"));
    assert!(!state.loading);
}

#[test]
fn clear_drops_items_and_fences_inflight_fetch() {
    let mut state = SessionsState::default();
    let seq = state.request_refresh();
    state.clear();
    assert!(!state.apply_list(seq, &[record(serde_json::json!({ "id": 5 }))]));
    assert!(state.items.is_empty());
}
