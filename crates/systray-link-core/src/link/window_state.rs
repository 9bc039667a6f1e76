use serde::Serialize;

/// Window state exchanged with the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    /// Window restored to its normal size.
    Normal,
    /// Window minimized.
    Minimized,
}

impl WindowState {
    /// Wire spelling of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            WindowState::Normal => "normal",
            WindowState::Minimized => "minimized",
        }
    }

    /// Parse the wire spelling. Anything else yields `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(WindowState::Normal),
            "minimized" => Some(WindowState::Minimized),
            _ => None,
        }
    }
}
