use super::*;

// =============================================================
// SessionRecord decoding
// =============================================================

#[test]
fn session_record_decodes_backend_payload() {
    let body = serde_json::json!({
        "id": 42,
        "created_at": "2024-05-01T12:00:00.123456+00:00",
        "messages": [
            { "id": 1, "session_id": 42, "sender": "user", "content": "hello", "timestamp": "2024-05-01T12:00:01+00:00" },
            { "id": 2, "session_id": 42, "sender": "llm", "content": "hi there", "timestamp": "2024-05-01T12:00:02+00:00" }
        ]
    });
    let record: SessionRecord = serde_json::from_value(body).expect("decode");
    assert_eq!(record.id, 42);
    assert_eq!(record.title, None);
    assert_eq!(record.messages.len(), 2);
    assert_eq!(record.messages[1].sender.as_deref(), Some("llm"));
    assert!(record.created_at().is_some());
}

#[test]
fn session_record_requires_id() {
    let body = serde_json::json!({ "messages": [] });
    assert!(serde_json::from_value::<SessionRecord>(body).is_err());
}

#[test]
fn session_record_accepts_integral_float_id() {
    let body = serde_json::json!({ "id": 7.0 });
    let record: SessionRecord = serde_json::from_value(body).expect("decode");
    assert_eq!(record.id, 7);
    assert!(record.messages.is_empty());
}

#[test]
fn session_record_skips_non_object_messages_and_defaults_fields() {
    let body = serde_json::json!({
        "id": 3,
        "title": null,
        "messages": [
            "garbage",
            42,
            { "id": 5, "content": "kept" },
            { "sender": 17, "content": null }
        ]
    });
    let record: SessionRecord = serde_json::from_value(body).expect("decode");
    assert_eq!(record.messages.len(), 2);
    assert_eq!(record.messages[0].id, Some(5));
    assert_eq!(record.messages[0].sender, None);
    assert_eq!(record.messages[1].id, None);
    assert_eq!(record.messages[1].sender.as_deref(), Some("17"));
    assert_eq!(record.messages[1].content, None);
}

#[test]
fn session_record_non_array_messages_is_empty() {
    let body = serde_json::json!({ "id": 3, "messages": { "oops": true } });
    let record: SessionRecord = serde_json::from_value(body).expect("decode");
    assert!(record.messages.is_empty());
}

#[test]
fn display_title_falls_back_to_numbered_label() {
    let mut record: SessionRecord = serde_json::from_value(serde_json::json!({ "id": 9 })).expect("decode");
    assert_eq!(record.display_title(), "Chat #9");
    record.title = Some("   ".to_owned());
    assert_eq!(record.display_title(), "Chat #9");
    record.title = Some(" Trip plans ".to_owned());
    assert_eq!(record.display_title(), "Trip plans");
}

// =============================================================
// WireMessage conversion
// =============================================================

#[test]
fn into_message_maps_fields() {
    let wire = WireMessage {
        id: Some(2),
        sender: Some("llm".to_owned()),
        content: Some("hi".to_owned()),
        timestamp: Some("2024-05-01T12:00:02Z".to_owned()),
    };
    let msg = wire.into_message(|| -1, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(msg.id, 2);
    assert_eq!(msg.sender, Sender::Assistant);
    assert_eq!(msg.content, "hi");
    assert_eq!(msg.timestamp.unix_timestamp(), 1_714_564_802);
}

#[test]
fn into_message_defaults_missing_fields() {
    let received = OffsetDateTime::from_unix_timestamp(1_000).expect("timestamp");
    let msg = WireMessage::default().into_message(|| -77, received);
    assert_eq!(msg.id, -77);
    assert_eq!(msg.sender, Sender::Assistant);
    assert_eq!(msg.content, "");
    assert_eq!(msg.timestamp, received);
}

#[test]
fn into_message_does_not_consume_fallback_when_id_present() {
    let mut called = false;
    let wire = WireMessage { id: Some(1), ..WireMessage::default() };
    let _ = wire.into_message(
        || {
            called = true;
            -1
        },
        OffsetDateTime::UNIX_EPOCH,
    );
    assert!(!called);
}

// =============================================================
// Timestamps
// =============================================================

#[test]
fn parse_timestamp_accepts_offset_and_naive_forms() {
    let with_offset = parse_timestamp("2024-05-01T12:00:00+02:00").expect("offset");
    assert_eq!(with_offset.unix_timestamp(), 1_714_557_600);
    let naive = parse_timestamp("2024-05-01T12:00:00.250000").expect("naive");
    assert_eq!(naive.unix_timestamp(), 1_714_564_800);
}

#[test]
fn parse_timestamp_rejects_garbage() {
    assert!(parse_timestamp("").is_none());
    assert!(parse_timestamp("yesterday").is_none());
}

// =============================================================
// Request encoding
// =============================================================

#[test]
fn send_prompt_request_serializes_null_session_for_new_chat() {
    let req = SendPromptRequest { content: "hello".to_owned(), session_id: None };
    let value = serde_json::to_value(&req).expect("encode");
    assert_eq!(value, serde_json::json!({ "content": "hello", "session_id": null }));
}
