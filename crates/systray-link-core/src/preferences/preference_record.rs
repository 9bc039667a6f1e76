//! Mutable preference record with change notifications.
//!
//! Every setter compares against the current value first and only notifies
//! subscribers when something actually changed.

use crate::{IconType, PreferenceChange, PreferenceField, PreferenceSubscription, Preferences};

use tokio::sync::mpsc;
use tracing::trace;

/// Preference state shared between the application and the peer.
#[derive(Debug, Default)]
pub struct PreferenceRecord {
    values: Preferences,
    broadcast_enabled: bool,
    subscribers: Vec<mpsc::UnboundedSender<PreferenceChange>>,
}

impl PreferenceRecord {
    /// Create a record holding the default preferences with broadcasting off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for change notifications.
    ///
    /// Dropping the returned subscription unsubscribes on the next change.
    pub fn subscribe(&mut self) -> PreferenceSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        PreferenceSubscription::new(rx)
    }

    /// Current preference values.
    pub fn values(&self) -> &Preferences {
        &self.values
    }

    /// Active tray icon variant.
    pub fn icon_type(&self) -> IconType {
        self.values.icon_type
    }

    /// MIME type of the custom icon bytes.
    pub fn icon_mime(&self) -> &str {
        &self.values.icon_mime
    }

    /// Raw custom icon bytes.
    pub fn icon_data(&self) -> &[u8] {
        &self.values.icon_data
    }

    /// Hide the window instead of minimizing it.
    pub fn hide_on_minimize(&self) -> bool {
        self.values.hide_on_minimize
    }

    /// Launch in minimized state.
    pub fn start_minimized(&self) -> bool {
        self.values.start_minimized
    }

    /// Show diagnostic UI.
    pub fn debug(&self) -> bool {
        self.values.debug
    }

    /// Whether local changes are propagated to the peer.
    pub fn broadcast_enabled(&self) -> bool {
        self.broadcast_enabled
    }

    /// Set the tray icon variant.
    pub fn set_icon_type(&mut self, icon_type: IconType) {
        if self.values.icon_type != icon_type {
            self.values.icon_type = icon_type;
            self.notify(PreferenceField::IconType);
        }
    }

    /// Set the MIME type of the custom icon bytes.
    pub fn set_icon_mime(&mut self, icon_mime: impl Into<String>) {
        let icon_mime = icon_mime.into();
        if self.values.icon_mime != icon_mime {
            self.values.icon_mime = icon_mime;
            self.notify(PreferenceField::IconMime);
        }
    }

    /// Set the custom icon bytes.
    pub fn set_icon_data(&mut self, icon_data: Vec<u8>) {
        if self.values.icon_data != icon_data {
            self.values.icon_data = icon_data;
            self.notify(PreferenceField::IconData);
        }
    }

    /// Set the hide-on-minimize behaviour.
    pub fn set_hide_on_minimize(&mut self, hide: bool) {
        if self.values.hide_on_minimize != hide {
            self.values.hide_on_minimize = hide;
            self.notify(PreferenceField::HideOnMinimize);
        }
    }

    /// Set whether the application starts minimized.
    pub fn set_start_minimized(&mut self, start_minimized: bool) {
        if self.values.start_minimized != start_minimized {
            self.values.start_minimized = start_minimized;
            self.notify(PreferenceField::StartMinimized);
        }
    }

    /// Set whether the diagnostic UI is shown.
    pub fn set_debug(&mut self, debug: bool) {
        if self.values.debug != debug {
            self.values.debug = debug;
            self.notify(PreferenceField::Debug);
        }
    }

    /// Open or close the broadcast gate.
    pub fn set_broadcast_enabled(&mut self, enabled: bool) {
        if self.broadcast_enabled != enabled {
            self.broadcast_enabled = enabled;
            self.notify(PreferenceField::BroadcastEnabled);
        }
    }

    fn notify(&mut self, field: PreferenceField) {
        trace!(field = ?field, subscribers = self.subscribers.len(), "Preference changed");

        let change = PreferenceChange {
            field,
            snapshot: self.values.clone(),
            broadcast_enabled: self.broadcast_enabled,
        };

        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}
