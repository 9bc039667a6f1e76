use serde::{Deserialize, Serialize};

/// Largest frame accepted in either direction (1 MiB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 1024 * 1024;

/// Consecutive invalid frames tolerated before the peer is considered gone.
pub const DEFAULT_INVALID_FRAME_LIMIT: u32 = 20;

/// Tunables for the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Frames above this length are drained unread inbound and rejected outbound.
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,

    /// The peer-unresponsive signal fires once the invalid frame counter exceeds this.
    #[serde(default = "default_invalid_frame_limit")]
    pub invalid_frame_limit: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            invalid_frame_limit: DEFAULT_INVALID_FRAME_LIMIT,
        }
    }
}

fn default_max_frame_len() -> usize {
    DEFAULT_MAX_FRAME_LEN
}

fn default_invalid_frame_limit() -> u32 {
    DEFAULT_INVALID_FRAME_LIMIT
}
