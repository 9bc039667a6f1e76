use crate::{
    IconType, LinkConfig, LinkController, LinkError, LinkNotice, ReaderEvent, ShutdownReason,
    SyncState, WindowState,
    tests::support::{BrokenPipe, SharedBuffer, frame, frames_as_json},
};

use std::io::Cursor;

use serde_json::json;

fn controller() -> (LinkController<SharedBuffer>, SharedBuffer) {
    let sink = SharedBuffer::default();
    (LinkController::new(sink.clone(), LinkConfig::default()), sink)
}

/// WHAT: Local changes are not broadcast while suppressed
/// WHY: The peer must not receive our defaults before it has sent its own
#[test]
#[allow(clippy::unwrap_used)]
fn given_suppressed_controller_when_changing_preferences_then_no_frames() {
    // Given: A fresh controller
    let (mut link, sink) = controller();
    assert_eq!(link.sync_state(), SyncState::Suppressed);

    // When: Changing every broadcast-worthy field
    link.update_preferences(|prefs| {
        prefs.set_icon_type(IconType::Custom);
        prefs.set_icon_data(vec![1, 2, 3]);
        prefs.set_hide_on_minimize(false);
        prefs.set_start_minimized(true);
        prefs.set_debug(true);
    })
    .unwrap();

    // Then: Record updated, nothing written
    assert!(link.preferences().debug());
    assert!(sink.contents().is_empty());
}

/// WHAT: Each armed change sends the full record as of that change
/// WHY: No coalescing; the peer sees every step in order
#[test]
#[allow(clippy::unwrap_used)]
fn given_armed_controller_when_setting_icon_type_three_times_then_three_frames_in_order() {
    // Given: An armed controller
    let (mut link, sink) = controller();
    link.arm();

    // When: Three distinct icon types in one update
    link.update_preferences(|prefs| {
        prefs.set_icon_type(IconType::NewMail);
        prefs.set_icon_type(IconType::Custom);
        prefs.set_icon_type(IconType::Blank);
    })
    .unwrap();

    // Then: Three full-record frames, in call order
    let frames = frames_as_json(&sink.contents());
    assert_eq!(frames.len(), 3);
    for (frame, icon_type) in frames.iter().zip(["1", "2", "0"]) {
        assert_eq!(frame["preferences"]["iconType"], icon_type);
        assert_eq!(frame["preferences"]["iconMime"], "image/png");
        assert_eq!(frame["preferences"]["hideOnMinimize"], "true");
        assert_eq!(frame["preferences"]["debug"], "false");
    }
}

/// WHAT: A mime change alone sends nothing; it rides with the next icon change
/// WHY: Mime and bytes are only meaningful together
#[test]
#[allow(clippy::unwrap_used)]
fn given_armed_controller_when_changing_mime_then_sent_with_icon_data() {
    // Given: An armed controller
    let (mut link, sink) = controller();
    link.arm();

    // When: Changing the mime, then the bytes
    link.update_preferences(|prefs| prefs.set_icon_mime("image/svg+xml"))
        .unwrap();
    assert!(sink.contents().is_empty());
    link.update_preferences(|prefs| prefs.set_icon_data(b"<svg/>".to_vec()))
        .unwrap();

    // Then: One frame carrying both
    let frames = frames_as_json(&sink.contents());
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["preferences"]["iconMime"], "image/svg+xml");
    assert_eq!(frames[0]["preferences"]["icon"], "PHN2Zy8+");
}

/// WHAT: Peer preferences are applied without an echo and arm the link
/// WHY: Echoing the peer's own update back would loop
#[test]
#[allow(clippy::unwrap_used)]
fn given_peer_preferences_when_handling_frame_then_applied_without_echo() {
    // Given: A suppressed controller
    let (mut link, sink) = controller();
    let payload = serde_json::to_vec(&json!({
        "preferences": { "debug": "true", "iconType": "1", "startMinimized": "true" }
    }))
    .unwrap();

    // When: Handling the peer's update
    let notices = link.handle_reader_event(ReaderEvent::Frame(payload)).unwrap();

    // Then: Applied, armed, nothing written back
    assert_eq!(notices, vec![LinkNotice::PreferencesApplied]);
    assert!(link.preferences().debug());
    assert!(link.preferences().start_minimized());
    assert_eq!(link.preferences().icon_type(), IconType::NewMail);
    assert!(link.preferences().hide_on_minimize());
    assert_eq!(link.sync_state(), SyncState::Armed);
    assert!(sink.contents().is_empty());

    // And: A later local change is broadcast
    link.update_preferences(|prefs| prefs.set_debug(false)).unwrap();
    let frames = frames_as_json(&sink.contents());
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["preferences"]["debug"], "false");
    assert_eq!(frames[0]["preferences"]["startMinimized"], "true");
}

/// WHAT: "yes" is read as false for a boolean preference
/// WHY: Only the exact string "true" is truthy
#[test]
#[allow(clippy::unwrap_used)]
fn given_debug_yes_when_handling_frame_then_debug_false() {
    let (mut link, _sink) = controller();
    link.handle_frame(br#"{"preferences":{"debug":"true"}}"#)
        .unwrap();
    assert!(link.preferences().debug());

    link.handle_frame(br#"{"preferences":{"debug":"yes"}}"#)
        .unwrap();

    assert!(!link.preferences().debug());
}

/// WHAT: Status messages become notices for the presentation layer
/// WHY: The controller dispatches, it does not render
#[test]
#[allow(clippy::unwrap_used)]
fn given_status_message_when_handling_frame_then_notices_emitted() {
    let (mut link, _sink) = controller();

    let notices = link
        .handle_frame(br#"{"unreadMail":4,"title":"Inbox","window":"normal"}"#)
        .unwrap();

    assert_eq!(
        notices,
        vec![
            LinkNotice::UnreadMail(4),
            LinkNotice::Title("Inbox".to_string()),
            LinkNotice::WindowState(WindowState::Normal),
        ]
    );
}

/// WHAT: Malformed payloads are dropped silently
/// WHY: Decode problems are absorbed locally
#[test]
#[allow(clippy::unwrap_used)]
fn given_malformed_payload_when_handling_frame_then_no_notices() {
    let (mut link, sink) = controller();

    let notices = link.handle_frame(b"{not json").unwrap();

    assert!(notices.is_empty());
    assert!(!link.is_closed());
    assert!(sink.contents().is_empty());
}

/// WHAT: A shutdown message closes the link
/// WHY: The peer going away ends the process
#[test]
#[allow(clippy::unwrap_used)]
fn given_shutdown_message_when_handling_frame_then_link_closed() {
    // Given: An open controller
    let (mut link, _sink) = controller();

    // When: The peer asks to shut down
    let notices = link.handle_frame(br#"{"shutdown":"true"}"#).unwrap();

    // Then: Shutdown notice and further writes fail
    assert_eq!(
        notices,
        vec![LinkNotice::Shutdown(ShutdownReason::PeerRequested)]
    );
    assert!(link.is_closed());
    assert!(matches!(
        link.send_window_state(WindowState::Normal),
        Err(LinkError::LinkClosed { .. })
    ));
}

/// WHAT: The invalid frame heuristic and end of stream both shut down
/// WHY: Either means the peer is gone
#[test]
#[allow(clippy::unwrap_used)]
fn given_reader_failure_events_when_handling_then_shutdown_notices() {
    let (mut link, _sink) = controller();
    assert_eq!(
        link.handle_reader_event(ReaderEvent::PeerUnresponsive { invalid_frames: 21 })
            .unwrap(),
        vec![LinkNotice::Shutdown(ShutdownReason::PeerUnresponsive)]
    );
    assert!(link.is_closed());

    let (mut link, _sink) = controller();
    assert_eq!(
        link.handle_reader_event(ReaderEvent::Disconnected).unwrap(),
        vec![LinkNotice::Shutdown(ShutdownReason::Disconnected)]
    );

    // Shutting down twice is harmless
    link.shutdown(ShutdownReason::LocalQuit).unwrap();
}

/// WHAT: Window commands and the preference request go out as frames
/// WHY: These are the controller's unsolicited outbound messages
#[test]
#[allow(clippy::unwrap_used)]
fn given_open_link_when_sending_commands_then_frames_written() {
    let (mut link, sink) = controller();

    link.request_preferences().unwrap();
    link.send_window_state(WindowState::Minimized).unwrap();
    link.send_window_state(WindowState::Normal).unwrap();

    assert_eq!(
        frames_as_json(&sink.contents()),
        vec![
            json!({ "preferences": {} }),
            json!({ "window": "minimized" }),
            json!({ "window": "normal" }),
        ]
    );
}

/// WHAT: A write failure closes the link
/// WHY: Outbound failures are not retried
#[test]
fn given_broken_stream_when_broadcasting_then_io_error_and_link_closed() {
    // Given: An armed controller over a failing stream
    let mut link = LinkController::new(BrokenPipe, LinkConfig::default());
    link.arm();

    // When: A broadcast-worthy change
    let result = link.update_preferences(|prefs| prefs.set_debug(true));

    // Then: Io error, link closed, record kept the value
    assert!(matches!(result, Err(LinkError::Io { .. })));
    assert!(link.is_closed());
    assert!(link.preferences().debug());
}

/// WHAT: A started link reads from its own thread and shuts down at end of input
/// WHY: This is the path the binary runs on stdin and stdout
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_started_link_when_input_ends_then_notices_then_shutdown() {
    // Given: A link started over a single status frame
    let sink = SharedBuffer::default();
    let input = Cursor::new(frame(br#"{"unreadMail":2}"#));
    let (mut link, mut events) =
        LinkController::start(input, sink.clone(), LinkConfig::default()).unwrap();

    // When: Handling every reader event
    let mut notices = Vec::new();
    while let Some(event) = events.recv().await {
        notices.extend(link.handle_reader_event(event).unwrap());
        if link.is_closed() {
            break;
        }
    }

    // Then: The status arrives before the disconnect shuts the link down
    assert_eq!(
        notices,
        vec![
            LinkNotice::UnreadMail(2),
            LinkNotice::Shutdown(ShutdownReason::Disconnected),
        ]
    );
    assert!(sink.contents().is_empty());
}
