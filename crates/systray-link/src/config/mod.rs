mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;

pub(crate) use {behaviour_config::BehaviourConfig, config::Config, logging_config::LoggingConfig};

pub(crate) const DEFAULT_REQUEST_PREFERENCES_ON_START: bool = true;
pub(crate) const DEFAULT_LOG_FILTER: &str = "systray_link=info,systray_link_core=info";
pub(crate) const DEFAULT_LOG_TO_FILE: bool = true;

pub(crate) fn default_request_preferences_on_start() -> bool {
    DEFAULT_REQUEST_PREFERENCES_ON_START
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

pub(crate) fn default_log_to_file() -> bool {
    DEFAULT_LOG_TO_FILE
}
