use crate::WindowState;

/// Why the link shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The peer sent a shutdown message.
    PeerRequested,
    /// The invalid frame heuristic fired.
    PeerUnresponsive,
    /// The inbound stream reached end of file.
    Disconnected,
    /// The local user chose to quit.
    LocalQuit,
}

/// Decoded inbound traffic routed to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkNotice {
    /// New unread mail count.
    UnreadMail(u32),
    /// New window title.
    Title(String),
    /// Peer window state changed.
    WindowState(WindowState),
    /// A peer preference update was applied to the record.
    PreferencesApplied,
    /// The link has shut down; the application should terminate.
    Shutdown(ShutdownReason),
}
