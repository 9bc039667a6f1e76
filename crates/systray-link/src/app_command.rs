use systray_link_core::WindowState;

/// Commands sent from the tray side to the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Ask the add-on to restore or minimize its window.
    SetWindowState(WindowState),
    /// The tray has taken over the add-on's preferences and may push changes back.
    EnableSync,
    /// The user chose to quit.
    Quit,
}
