use crate::{IconType, PreferenceRecord, Preferences};

/// Partial preference fields received from the peer.
///
/// Absent fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceUpdate {
    /// New icon variant.
    pub icon_type: Option<IconType>,
    /// New icon MIME type.
    pub icon_mime: Option<String>,
    /// New decoded icon bytes.
    pub icon_data: Option<Vec<u8>>,
    /// New hide-on-minimize flag.
    pub hide_on_minimize: Option<bool>,
    /// New start-minimized flag.
    pub start_minimized: Option<bool>,
    /// New debug flag.
    pub debug: Option<bool>,
}

impl PreferenceUpdate {
    /// An update carrying every field of `preferences`.
    pub fn full(preferences: &Preferences) -> Self {
        Self {
            icon_type: Some(preferences.icon_type),
            icon_mime: Some(preferences.icon_mime.clone()),
            icon_data: Some(preferences.icon_data.clone()),
            hide_on_minimize: Some(preferences.hide_on_minimize),
            start_minimized: Some(preferences.start_minimized),
            debug: Some(preferences.debug),
        }
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present fields through the record's setters.
    pub fn apply_to(self, record: &mut PreferenceRecord) {
        if let Some(icon_type) = self.icon_type {
            record.set_icon_type(icon_type);
        }
        if let Some(icon_mime) = self.icon_mime {
            record.set_icon_mime(icon_mime);
        }
        if let Some(icon_data) = self.icon_data {
            record.set_icon_data(icon_data);
        }
        if let Some(hide) = self.hide_on_minimize {
            record.set_hide_on_minimize(hide);
        }
        if let Some(start_minimized) = self.start_minimized {
            record.set_start_minimized(start_minimized);
        }
        if let Some(debug) = self.debug {
            record.set_debug(debug);
        }
    }
}
