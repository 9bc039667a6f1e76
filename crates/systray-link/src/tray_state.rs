//! Tray presentation state.
//!
//! Tracks what the tray would display and logs every change. Drawing the
//! icon is left to whatever front end embeds this state.
//!
//! The first preferences from the add-on enable sync and, when the user asked
//! to start minimized, send the window to the tray.

use crate::{AppCommand, Presentation, TrayIconState};

use systray_link_core::{IconType, Preferences, WindowState};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Last known tray state.
#[derive(Debug)]
pub struct TrayState {
    unread_count: u32,
    title: String,
    window_state: WindowState,
    icon_type: IconType,
    hide_on_minimize: bool,
    debug: bool,
    synced: bool,
    commands: mpsc::Sender<AppCommand>,
}

impl TrayState {
    /// Create a tray state showing no unread mail.
    pub fn new(commands: mpsc::Sender<AppCommand>) -> Self {
        Self {
            unread_count: 0,
            title: String::new(),
            window_state: WindowState::Normal,
            icon_type: IconType::Blank,
            hide_on_minimize: true,
            debug: false,
            synced: false,
            commands,
        }
    }

    /// Icon the tray should show.
    pub fn icon_state(&self) -> TrayIconState {
        if self.unread_count == 0 {
            TrayIconState::Idle
        } else {
            TrayIconState::Unread {
                icon: self.icon_type,
                count: self.unread_count,
            }
        }
    }

    /// Tooltip text for the tray icon.
    pub fn tooltip(&self) -> String {
        match (self.unread_count, self.title.is_empty()) {
            (0, true) => "SysTray-Link".to_string(),
            (0, false) => self.title.clone(),
            (count, true) => format!("{} unread", count),
            (count, false) => format!("{} - {} unread", self.title, count),
        }
    }

    // Runs on the control loop, so it must not wait for channel capacity.
    fn send(&self, cmd: AppCommand) {
        if let Err(e) = self.commands.try_send(cmd) {
            warn!(command = ?cmd, error = %e, "Failed to queue tray command");
        }
    }
}

impl Presentation for TrayState {
    fn set_unread_count(&mut self, count: u32) {
        if self.unread_count != count {
            self.unread_count = count;
            info!(unread = count, icon = ?self.icon_state(), "Unread count changed");
        }
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            debug!(tooltip = %self.tooltip(), "Title changed");
        }
    }

    fn set_window_state(&mut self, state: WindowState) {
        if self.window_state != state {
            self.window_state = state;
            debug!(
                state = state.as_str(),
                hidden = state == WindowState::Minimized && self.hide_on_minimize,
                "Window state changed"
            );
        }
    }

    fn apply_preferences(&mut self, preferences: &Preferences) {
        self.icon_type = preferences.icon_type;
        self.hide_on_minimize = preferences.hide_on_minimize;
        if self.debug != preferences.debug {
            self.debug = preferences.debug;
            info!(enabled = self.debug, "Diagnostics toggled");
        }
        info!(
            icon_type = ?preferences.icon_type,
            icon_mime = %preferences.icon_mime,
            icon_len = preferences.icon_data.len(),
            hide_on_minimize = preferences.hide_on_minimize,
            start_minimized = preferences.start_minimized,
            debug = preferences.debug,
            "Preferences applied"
        );

        if !self.synced {
            self.synced = true;
            self.send(AppCommand::EnableSync);
            if preferences.start_minimized && self.window_state != WindowState::Minimized {
                self.send(AppCommand::SetWindowState(WindowState::Minimized));
            }
        }
    }
}
