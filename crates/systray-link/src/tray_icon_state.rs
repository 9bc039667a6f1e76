use systray_link_core::IconType;

/// What the tray icon should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// No unread mail; the plain application icon.
    Idle,
    /// Unread mail present, drawn with the configured icon variant.
    Unread {
        /// Icon variant chosen in the preferences.
        icon: IconType,
        /// Number of unread mails.
        count: u32,
    },
}
