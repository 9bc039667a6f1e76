use crate::{
    IconType, InboundMessage, LinkError, MessageCodec, PreferenceRecord, PreferenceUpdate,
    Preferences, WindowState,
};

use serde_json::{Value, json};

#[allow(clippy::unwrap_used)]
fn decode(value: Value) -> Vec<InboundMessage> {
    MessageCodec::decode(&serde_json::to_vec(&value).unwrap()).unwrap()
}

#[allow(clippy::unwrap_used)]
fn decode_preferences(preferences: Value) -> PreferenceUpdate {
    match decode(json!({ "preferences": preferences })).pop().unwrap() {
        InboundMessage::PreferencesUpdate(update) => update,
        other => unreachable!("unexpected message {other:?}"),
    }
}

/// WHAT: A numeric unread count decodes to exactly one message
/// WHY: The tray badge is driven by this message
#[test]
fn given_numeric_unread_mail_when_decoding_then_single_unread_update() {
    // Given/When: An unread count
    let messages = decode(json!({ "unreadMail": 5 }));

    // Then: One UnreadCountUpdate
    assert_eq!(messages, vec![InboundMessage::UnreadCountUpdate(5)]);
}

/// WHAT: A string unread count is ignored
/// WHY: Wrong JSON types are skipped, never coerced
#[test]
fn given_string_unread_mail_when_decoding_then_no_message() {
    assert!(decode(json!({ "unreadMail": "5" })).is_empty());
}

/// WHAT: Negative or fractional counts are ignored
/// WHY: The unread count is a non-negative integer
#[test]
fn given_out_of_range_unread_mail_when_decoding_then_no_message() {
    assert!(decode(json!({ "unreadMail": -1 })).is_empty());
    assert!(decode(json!({ "unreadMail": 2.5 })).is_empty());
    assert_eq!(
        decode(json!({ "unreadMail": 3.0 })),
        vec![InboundMessage::UnreadCountUpdate(3)]
    );
}

/// WHAT: Several keys in one object each yield their own message
/// WHY: The peer batches updates into a single frame
#[test]
fn given_multiple_keys_when_decoding_then_each_yields_a_message() {
    // Given/When: An object with every top level key
    let messages = decode(json!({
        "unreadMail": 2,
        "title": "Inbox - Mail",
        "shutdown": "",
        "window": "minimized",
        "preferences": {},
    }));

    // Then: All five messages in key-check order
    assert_eq!(
        messages,
        vec![
            InboundMessage::UnreadCountUpdate(2),
            InboundMessage::TitleUpdate("Inbox - Mail".to_string()),
            InboundMessage::ShutdownRequest,
            InboundMessage::WindowStateUpdate(WindowState::Minimized),
            InboundMessage::PreferencesUpdate(PreferenceUpdate::default()),
        ]
    );
}

/// WHAT: Mistyped keys are skipped while valid siblings survive
/// WHY: Tolerant-by-omission is per key, not per object
#[test]
fn given_mixed_valid_and_mistyped_keys_when_decoding_then_only_valid_survive() {
    // Given/When: Wrong types for most keys, one valid title
    let messages = decode(json!({
        "unreadMail": true,
        "title": "Drafts",
        "shutdown": 1,
        "window": ["normal"],
        "preferences": "debug",
    }));

    // Then: Only the title remains
    assert_eq!(
        messages,
        vec![InboundMessage::TitleUpdate("Drafts".to_string())]
    );
}

/// WHAT: Unknown window states are dropped
/// WHY: Only normal and minimized have a meaning
#[test]
fn given_unknown_window_state_when_decoding_then_no_message() {
    assert!(decode(json!({ "window": "maximized" })).is_empty());
    assert_eq!(
        decode(json!({ "window": "normal" })),
        vec![InboundMessage::WindowStateUpdate(WindowState::Normal)]
    );
}

/// WHAT: Malformed JSON is reported as MalformedPayload
/// WHY: The controller drops these without surfacing them to the peer
#[test]
fn given_malformed_json_when_decoding_then_malformed_payload_error() {
    let result = MessageCodec::decode(b"{\"title\": ");
    assert!(matches!(result, Err(LinkError::MalformedPayload { .. })));
}

/// WHAT: JSON that is not an object yields no messages
/// WHY: Only objects carry keys to dispatch on
#[test]
fn given_json_array_when_decoding_then_no_messages() {
    assert!(decode(json!([{ "title": "x" }])).is_empty());
}

/// WHAT: "true" is the only truthy string; other strings mean false
/// WHY: Booleans travel as strings on the wire
#[test]
fn given_string_booleans_when_decoding_preferences_then_only_exact_true_is_true() {
    // Given/When: Several spellings
    let update = decode_preferences(json!({
        "debug": "true",
        "hideOnMinimize": "yes",
        "startMinimized": "TRUE",
    }));

    // Then: Only the exact match is true; present fields are Some(false)
    assert_eq!(update.debug, Some(true));
    assert_eq!(update.hide_on_minimize, Some(false));
    assert_eq!(update.start_minimized, Some(false));
}

/// WHAT: Native JSON booleans are ignored in preferences
/// WHY: Wire compatibility requires the string form
#[test]
fn given_native_boolean_when_decoding_preferences_then_field_absent() {
    let update = decode_preferences(json!({ "debug": true, "iconType": 2 }));
    assert_eq!(update, PreferenceUpdate::default());
}

/// WHAT: Icon type decodes from its decimal string, unknown values are dropped
/// WHY: The enum travels as a string containing its integer value
#[test]
fn given_icon_type_strings_when_decoding_then_known_values_map() {
    assert_eq!(
        decode_preferences(json!({ "iconType": "1" })).icon_type,
        Some(IconType::NewMail)
    );
    assert_eq!(decode_preferences(json!({ "iconType": "7" })).icon_type, None);
    assert_eq!(decode_preferences(json!({ "iconType": "abc" })).icon_type, None);
}

/// WHAT: Icon bytes are base64 decoded, invalid base64 is dropped
/// WHY: Raw image bytes cannot travel inside JSON strings
#[test]
fn given_base64_icon_when_decoding_then_raw_bytes_restored() {
    let update = decode_preferences(json!({ "icon": "iVBORw0K", "iconMime": "image/svg+xml" }));
    assert_eq!(update.icon_data, Some(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a]));
    assert_eq!(update.icon_mime.as_deref(), Some("image/svg+xml"));

    assert_eq!(decode_preferences(json!({ "icon": "not base64!" })).icon_data, None);
}

/// WHAT: Encoding always writes all six fields as strings
/// WHY: The peer expects the full record with string booleans
#[test]
#[allow(clippy::unwrap_used)]
fn given_preferences_when_encoding_then_all_fields_present_as_strings() {
    // Given: Non-default preferences
    let preferences = Preferences {
        icon_type: IconType::Custom,
        icon_mime: "image/jpeg".to_string(),
        icon_data: vec![1, 2, 3],
        hide_on_minimize: false,
        start_minimized: true,
        debug: true,
    };

    // When: Encoding
    let payload = MessageCodec::encode_preferences(&preferences).unwrap();
    let document: Value = serde_json::from_slice(&payload).unwrap();

    // Then: The exact wire shape
    assert_eq!(
        document,
        json!({
            "preferences": {
                "debug": "true",
                "hideOnMinimize": "false",
                "startMinimized": "true",
                "iconType": "2",
                "iconMime": "image/jpeg",
                "icon": "AQID",
            }
        })
    );
}

/// WHAT: Decoding an encoded record restores every field
/// WHY: Both directions must agree on the wire format for any record
#[test]
#[allow(clippy::unwrap_used)]
fn given_encoded_records_when_decoding_and_applying_then_records_match() {
    let icon_types = [IconType::Blank, IconType::NewMail, IconType::Custom];
    let icons: [&[u8]; 2] = [b"", b"GIF89a\x00\xff"];
    let mimes = ["image/png", "image/gif"];

    for icon_type in icon_types {
        for flags in 0..8u8 {
            for icon in icons {
                for mime in mimes {
                    // Given: A record with this combination of values
                    let original = Preferences {
                        icon_type,
                        icon_mime: mime.to_string(),
                        icon_data: icon.to_vec(),
                        hide_on_minimize: flags & 1 != 0,
                        start_minimized: flags & 2 != 0,
                        debug: flags & 4 != 0,
                    };
                    let payload = MessageCodec::encode_preferences(&original).unwrap();

                    // When: Decoding and applying to a fresh record
                    let mut record = PreferenceRecord::new();
                    let messages = MessageCodec::decode(&payload).unwrap();
                    assert_eq!(messages.len(), 1);
                    for message in messages {
                        if let InboundMessage::PreferencesUpdate(update) = message {
                            assert_eq!(update, PreferenceUpdate::full(&original));
                            update.apply_to(&mut record);
                        }
                    }

                    // Then: The record equals the original
                    assert_eq!(record.values(), &original, "payload {payload:?}");
                }
            }
        }
    }
}

/// WHAT: Window commands and the preferences request have fixed shapes
/// WHY: The peer matches on these exact documents
#[test]
#[allow(clippy::unwrap_used)]
fn given_outbound_commands_when_encoding_then_shapes_match_wire() {
    assert_eq!(
        MessageCodec::encode_window_command(WindowState::Normal).unwrap(),
        br#"{"window":"normal"}"#
    );
    assert_eq!(
        MessageCodec::encode_window_command(WindowState::Minimized).unwrap(),
        br#"{"window":"minimized"}"#
    );
    assert_eq!(
        MessageCodec::encode_preferences_request().unwrap(),
        br#"{"preferences":{}}"#
    );
}
