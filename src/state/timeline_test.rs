use super::*;

// =============================================================
// Helpers
// =============================================================

fn msg(id: i64, sender: Sender, content: &str) -> Message {
    Message { id, sender, content: content.to_owned(), timestamp: OffsetDateTime::UNIX_EPOCH }
}

fn ids(timeline: &Timeline) -> Vec<i64> {
    timeline.messages().iter().map(|m| m.id).collect()
}

fn at_millis(ms: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).expect("valid timestamp")
}

// =============================================================
// Sender
// =============================================================

#[test]
fn sender_from_wire_maps_user_label() {
    assert_eq!(Sender::from_wire(Some("user")), Sender::User);
    assert_eq!(Sender::from_wire(Some(" User ")), Sender::User);
}

#[test]
fn sender_from_wire_treats_llm_unknown_and_missing_as_assistant() {
    assert_eq!(Sender::from_wire(Some("llm")), Sender::Assistant);
    assert_eq!(Sender::from_wire(Some("assistant")), Sender::Assistant);
    assert_eq!(Sender::from_wire(Some("system")), Sender::Assistant);
    assert_eq!(Sender::from_wire(None), Sender::Assistant);
}

// =============================================================
// TempIds
// =============================================================

#[test]
fn temp_ids_are_negative_and_flagged_optimistic() {
    let mut ids = TempIds::default();
    let id = ids.next(at_millis(1_700_000_000_000));
    assert_eq!(id, -1_700_000_000_000);
    assert!(is_temp_id(id));
    assert!(msg(id, Sender::User, "x").is_optimistic());
    assert!(!msg(42, Sender::User, "x").is_optimistic());
}

#[test]
fn temp_ids_never_repeat_within_same_millisecond() {
    let mut ids = TempIds::default();
    let now = at_millis(5_000);
    let a = ids.next(now);
    let b = ids.next(now);
    let c = ids.next(at_millis(4_000));
    assert_eq!(a, -5_000);
    assert_eq!(b, -5_001);
    assert_eq!(c, -5_002);
}

#[test]
fn temp_ids_at_epoch_stay_negative() {
    let mut ids = TempIds::default();
    assert!(ids.next(OffsetDateTime::UNIX_EPOCH) < 0);
}

// =============================================================
// append / replace_all
// =============================================================

#[test]
fn append_keeps_insertion_order() {
    let mut timeline = Timeline::default();
    assert!(timeline.append(msg(3, Sender::User, "a")));
    assert!(timeline.append(msg(1, Sender::Assistant, "b")));
    assert_eq!(ids(&timeline), vec![3, 1]);
    assert_eq!(timeline.last().map(|m| m.id), Some(1));
}

#[test]
fn append_rejects_duplicate_id() {
    let mut timeline = Timeline::default();
    timeline.append(msg(1, Sender::User, "first"));
    assert!(!timeline.append(msg(1, Sender::User, "second")));
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.get(1).map(|m| m.content.as_str()), Some("first"));
}

#[test]
fn replace_all_swaps_contents_and_dedupes() {
    let mut timeline = Timeline::default();
    timeline.append(msg(-9, Sender::User, "optimistic"));
    timeline.replace_all(vec![
        msg(1, Sender::User, "hello"),
        msg(2, Sender::Assistant, "hi"),
        msg(1, Sender::User, "dupe"),
    ]);
    assert_eq!(ids(&timeline), vec![1, 2]);
    assert_eq!(timeline.get(1).map(|m| m.content.as_str()), Some("hello"));
}

// =============================================================
// patch_content / remove_by_id
// =============================================================

#[test]
fn patch_content_updates_only_target() {
    let mut timeline = Timeline::default();
    timeline.append(msg(1, Sender::User, "hello"));
    timeline.append(msg(2, Sender::Assistant, ""));
    assert!(timeline.patch_content(2, "hi"));
    assert_eq!(timeline.get(1).map(|m| m.content.as_str()), Some("hello"));
    assert_eq!(timeline.get(2).map(|m| m.content.as_str()), Some("hi"));
}

#[test]
fn patch_content_missing_id_is_noop() {
    let mut timeline = Timeline::default();
    timeline.append(msg(1, Sender::User, "hello"));
    let before = timeline.clone();
    assert!(!timeline.patch_content(99, "ghost"));
    assert_eq!(timeline, before);
}

#[test]
fn remove_by_id_removes_exactly_one() {
    let mut timeline = Timeline::default();
    timeline.append(msg(1, Sender::User, "a"));
    timeline.append(msg(-5, Sender::User, "b"));
    timeline.append(msg(2, Sender::Assistant, "c"));
    let removed = timeline.remove_by_id(-5);
    assert_eq!(removed.map(|m| m.content), Some("b".to_owned()));
    assert_eq!(ids(&timeline), vec![1, 2]);
    assert!(timeline.remove_by_id(-5).is_none());
}

#[test]
fn clear_empties_timeline() {
    let mut timeline = Timeline::default();
    timeline.append(msg(1, Sender::User, "a"));
    timeline.clear();
    assert!(timeline.is_empty());
}
