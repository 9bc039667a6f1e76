use systray_link_core::{Preferences, WindowState};

/// Receives decoded link traffic on the control thread.
///
/// Rendering is outside this crate; implementations only need to react.
pub(crate) trait Presentation {
    /// The add-on reported a new unread count.
    fn set_unread_count(&mut self, count: u32);

    /// The add-on reported a new main window title.
    fn set_title(&mut self, title: &str);

    /// The add-on's window changed state.
    fn set_window_state(&mut self, state: WindowState);

    /// Preferences were updated from the add-on.
    fn apply_preferences(&mut self, preferences: &Preferences);
}
