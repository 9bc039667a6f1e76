use crate::{PreferenceUpdate, WindowState};

/// A message decoded from one inbound frame.
///
/// A single JSON object may yield several of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Number of unread mails changed.
    UnreadCountUpdate(u32),
    /// Title of the peer's main window changed.
    TitleUpdate(String),
    /// The peer is going away.
    ShutdownRequest,
    /// The peer's window changed state.
    WindowStateUpdate(WindowState),
    /// The peer pushed some or all of its preferences.
    PreferencesUpdate(PreferenceUpdate),
}
