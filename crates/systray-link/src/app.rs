use crate::{AppCommand, AppResult, Presentation, config::Config};

use std::io::Write;

use systray_link_core::{LinkController, LinkNotice, ReaderEvent, ShutdownReason};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Main application state.
///
/// Runs on the single control thread. The frame reader lives on its own
/// thread and only reaches this loop through `events`, so the link's writer
/// has exactly one caller.
pub struct App<W: Write> {
    pub(crate) link: LinkController<W>,
    pub(crate) events: mpsc::Receiver<ReaderEvent>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) presentation: Box<dyn Presentation>,
    pub(crate) config: Config,
}

impl<W: Write> App<W> {
    /// Run the main application event loop until the link shuts down.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<ShutdownReason> {
        info!("SysTray-Link starting");

        if self.config.behavior.request_preferences_on_start {
            self.link.request_preferences()?;
        }

        let reason = loop {
            tokio::select! {
                Some(event) = self.events.recv() => {
                    match self.link.handle_reader_event(event) {
                        Ok(notices) => {
                            if let Some(reason) = self.dispatch(notices) {
                                break reason;
                            }
                        }
                        Err(e) => {
                            error!(error = ?e, "Failed to handle link event");
                            if self.link.is_closed() {
                                break ShutdownReason::Disconnected;
                            }
                        }
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if let Some(reason) = self.handle_command(cmd) {
                        break reason;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    self.link.shutdown(ShutdownReason::Disconnected)?;
                    break ShutdownReason::Disconnected;
                }
            }
        };

        info!(reason = ?reason, "SysTray-Link shut down");

        Ok(reason)
    }

    /// Route notices to the presentation. Returns the reason once the link is down.
    fn dispatch(&mut self, notices: Vec<LinkNotice>) -> Option<ShutdownReason> {
        let mut shutdown = None;

        for notice in notices {
            match notice {
                LinkNotice::UnreadMail(count) => self.presentation.set_unread_count(count),
                LinkNotice::Title(title) => self.presentation.set_title(&title),
                LinkNotice::WindowState(state) => self.presentation.set_window_state(state),
                LinkNotice::PreferencesApplied => self
                    .presentation
                    .apply_preferences(self.link.preferences().values()),
                LinkNotice::Shutdown(reason) => {
                    info!(reason = ?reason, "Link requested shutdown");
                    shutdown = Some(reason);
                }
            }
        }

        shutdown
    }

    /// Apply a local command. Returns the reason if the link went down.
    fn handle_command(&mut self, cmd: AppCommand) -> Option<ShutdownReason> {
        debug!(command = ?cmd, "Handling command");

        let result = match cmd {
            AppCommand::SetWindowState(state) => self.link.send_window_state(state),
            AppCommand::EnableSync => {
                self.link.arm();
                Ok(())
            }
            AppCommand::Quit => {
                info!("Quit requested");
                if let Err(e) = self.link.shutdown(ShutdownReason::LocalQuit) {
                    warn!(error = ?e, "Failed to close link cleanly");
                }
                return Some(ShutdownReason::LocalQuit);
            }
        };

        if let Err(e) = result {
            error!(error = ?e, "Failed to send to add-on");
            if self.link.is_closed() {
                return Some(ShutdownReason::Disconnected);
            }
        }

        None
    }
}
