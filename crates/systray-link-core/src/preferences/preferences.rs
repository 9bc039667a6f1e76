use crate::{IconType, preferences::DEFAULT_ICON_MIME};

/// Snapshot of the preference fields shared with the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Active tray icon variant.
    pub icon_type: IconType,
    /// MIME type of `icon_data`.
    pub icon_mime: String,
    /// Raw custom icon image bytes.
    pub icon_data: Vec<u8>,
    /// Hide the window instead of minimizing it.
    pub hide_on_minimize: bool,
    /// Launch in minimized state.
    pub start_minimized: bool,
    /// Show diagnostic UI.
    pub debug: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            icon_type: IconType::Blank,
            icon_mime: DEFAULT_ICON_MIME.to_string(),
            icon_data: Vec::new(),
            hide_on_minimize: true,
            start_minimized: false,
            debug: false,
        }
    }
}
