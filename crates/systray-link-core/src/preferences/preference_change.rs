use crate::Preferences;

use tokio::sync::mpsc;

/// Identifies which preference a change notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    /// `icon_type` changed.
    IconType,
    /// `icon_mime` changed.
    IconMime,
    /// `icon_data` changed.
    IconData,
    /// `hide_on_minimize` changed.
    HideOnMinimize,
    /// `start_minimized` changed.
    StartMinimized,
    /// `debug` changed.
    Debug,
    /// The broadcast gate changed.
    BroadcastEnabled,
}

impl PreferenceField {
    /// Whether a change to this field is pushed to the peer.
    ///
    /// The mime type only travels along with the next full encode.
    pub fn triggers_broadcast(self) -> bool {
        !matches!(
            self,
            PreferenceField::IconMime | PreferenceField::BroadcastEnabled
        )
    }
}

/// A single change notification.
///
/// Carries a copy of the whole record as it was right after the setter ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    /// The field that changed.
    pub field: PreferenceField,
    /// Record contents at the time of the change.
    pub snapshot: Preferences,
    /// Value of the broadcast gate at the time of the change.
    pub broadcast_enabled: bool,
}

/// Receiving end of a [`PreferenceRecord`](crate::PreferenceRecord) subscription.
#[derive(Debug)]
pub struct PreferenceSubscription {
    rx: mpsc::UnboundedReceiver<PreferenceChange>,
}

impl PreferenceSubscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<PreferenceChange>) -> Self {
        Self { rx }
    }

    /// Next pending change, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<PreferenceChange> {
        self.rx.try_recv().ok()
    }

    /// Take every pending change in notification order.
    pub fn drain(&mut self) -> Vec<PreferenceChange> {
        let mut changes = Vec::new();
        while let Some(change) = self.try_next() {
            changes.push(change);
        }
        changes
    }
}
