mod icon_type;
mod preference_change;
mod preference_record;
#[allow(clippy::module_inception)]
mod preferences;

pub use {
    icon_type::IconType,
    preference_change::{PreferenceChange, PreferenceField, PreferenceSubscription},
    preference_record::PreferenceRecord,
    preferences::Preferences,
};

/// MIME type assumed for custom icon bytes until the peer says otherwise.
pub const DEFAULT_ICON_MIME: &str = "image/png";
