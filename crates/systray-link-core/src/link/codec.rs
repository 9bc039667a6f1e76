//! JSON message codec.
//!
//! Inbound decoding is tolerant by omission: a known key that is missing or
//! carries the wrong JSON type is skipped, never reported. Booleans and the
//! icon type travel as JSON strings in both directions.

use crate::{
    CoreResult, IconType, InboundMessage, LinkError, PreferenceUpdate, Preferences, WindowState,
};

use std::panic::Location;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

#[derive(Serialize)]
struct PreferencesEnvelope<'a> {
    preferences: WirePreferences<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePreferences<'a> {
    debug: &'static str,
    hide_on_minimize: &'static str,
    start_minimized: &'static str,
    icon_type: String,
    icon_mime: &'a str,
    icon: String,
}

#[derive(Serialize)]
struct WindowCommand {
    window: WindowState,
}

#[derive(Serialize)]
struct PreferencesRequest {
    preferences: Map<String, Value>,
}

/// Encodes outbound messages and decodes inbound ones.
pub struct MessageCodec;

impl MessageCodec {
    /// Decode one inbound payload into zero or more messages.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MalformedPayload`] if the payload is not JSON.
    /// Valid JSON that is not an object decodes to no messages.
    #[track_caller]
    pub fn decode(payload: &[u8]) -> CoreResult<Vec<InboundMessage>> {
        let document: Value =
            serde_json::from_slice(payload).map_err(|e| LinkError::MalformedPayload {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let Value::Object(object) = document else {
            debug!("Ignoring non-object JSON payload");
            return Ok(Vec::new());
        };

        let mut messages = Vec::new();

        if let Some(Value::Number(count)) = object.get("unreadMail") {
            match unread_count(count) {
                Some(count) => messages.push(InboundMessage::UnreadCountUpdate(count)),
                None => debug!(value = %count, "Ignoring out of range unread count"),
            }
        }

        if let Some(Value::String(title)) = object.get("title") {
            messages.push(InboundMessage::TitleUpdate(title.clone()));
        }

        if let Some(Value::String(_)) = object.get("shutdown") {
            messages.push(InboundMessage::ShutdownRequest);
        }

        if let Some(Value::String(window)) = object.get("window") {
            match WindowState::from_wire(window) {
                Some(state) => messages.push(InboundMessage::WindowStateUpdate(state)),
                None => debug!(window = %window, "Ignoring unknown window state"),
            }
        }

        if let Some(Value::Object(preferences)) = object.get("preferences") {
            messages.push(InboundMessage::PreferencesUpdate(Self::decode_preferences(
                preferences,
            )));
        }

        Ok(messages)
    }

    /// Decode the `preferences` sub-object field by field.
    pub fn decode_preferences(preferences: &Map<String, Value>) -> PreferenceUpdate {
        let mut update = PreferenceUpdate::default();

        if let Some(icon_type) = string_field(preferences, "iconType") {
            update.icon_type = icon_type
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(IconType::from_wire);
            if update.icon_type.is_none() {
                debug!(icon_type = %icon_type, "Ignoring unknown icon type");
            }
        }

        if let Some(icon_mime) = string_field(preferences, "iconMime") {
            update.icon_mime = Some(icon_mime.to_string());
        }

        if let Some(icon) = string_field(preferences, "icon") {
            match BASE64.decode(icon) {
                Ok(bytes) => update.icon_data = Some(bytes),
                Err(e) => debug!(error = %e, "Ignoring icon with invalid base64"),
            }
        }

        update.hide_on_minimize = string_field(preferences, "hideOnMinimize").map(is_true);
        update.start_minimized = string_field(preferences, "startMinimized").map(is_true);
        update.debug = string_field(preferences, "debug").map(is_true);

        update
    }

    /// Encode the full preference record.
    ///
    /// All six fields are always present.
    #[track_caller]
    pub fn encode_preferences(preferences: &Preferences) -> CoreResult<Vec<u8>> {
        let envelope = PreferencesEnvelope {
            preferences: WirePreferences {
                debug: bool_str(preferences.debug),
                hide_on_minimize: bool_str(preferences.hide_on_minimize),
                start_minimized: bool_str(preferences.start_minimized),
                icon_type: preferences.icon_type.as_wire().to_string(),
                icon_mime: &preferences.icon_mime,
                icon: BASE64.encode(&preferences.icon_data),
            },
        };

        to_payload(&envelope)
    }

    /// Encode a window state command.
    #[track_caller]
    pub fn encode_window_command(state: WindowState) -> CoreResult<Vec<u8>> {
        to_payload(&WindowCommand { window: state })
    }

    /// Encode a request for the peer's stored preferences.
    #[track_caller]
    pub fn encode_preferences_request() -> CoreResult<Vec<u8>> {
        to_payload(&PreferencesRequest {
            preferences: Map::new(),
        })
    }
}

#[track_caller]
fn to_payload<T: Serialize>(message: &T) -> CoreResult<Vec<u8>> {
    serde_json::to_vec(message).map_err(|e| LinkError::Encode {
        source: e,
        location: ErrorLocation::from(Location::caller()),
    })
}

fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn is_true(value: &str) -> bool {
    value == "true"
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// JSON numbers arrive as doubles from the peer; accept whole values only.
fn unread_count(count: &Number) -> Option<u32> {
    if let Some(value) = count.as_u64() {
        return u32::try_from(value).ok();
    }

    let value = count.as_f64()?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
