use crate::config::{DEFAULT_REQUEST_PREFERENCES_ON_START, default_request_preferences_on_start};

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Ask the add-on for its stored preferences as soon as the link is up.
    #[serde(default = "default_request_preferences_on_start")]
    pub request_preferences_on_start: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            request_preferences_on_start: DEFAULT_REQUEST_PREFERENCES_ON_START,
        }
    }
}
