//! SysTray-Link: native messaging companion for the mail client tray add-on.

mod app;
mod app_command;
mod config;
mod error;
mod logging;
mod presentation;
mod tray_icon_state;
mod tray_state;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    presentation::Presentation,
    tray_icon_state::TrayIconState,
    tray_state::TrayState,
};

use crate::config::Config;

use std::process::ExitCode;

use systray_link_core::{LinkController, ShutdownReason};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Application entry point.
fn main() -> ExitCode {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Dropping the guard flushes the log file, so it lives until main returns.
    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:?}", e);
            None
        }
    };

    if let Some(e) = config_error {
        warn!(error = ?e, "Failed to load config, using defaults");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    let result: AppResult<ShutdownReason> = runtime.block_on(async {
        let (link, events) =
            LinkController::start(std::io::stdin(), std::io::stdout(), config.link)?;

        let (command_tx, command_rx) = mpsc::channel(32);

        let tray = TrayState::new(command_tx.clone());

        // Ctrl-C is the local quit action when no front end is attached.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok()
                && command_tx.send(AppCommand::Quit).await.is_err()
            {
                warn!("Quit signal received after shutdown");
            }
        });

        let app = App {
            link,
            events,
            command_rx,
            presentation: Box::new(tray),
            config,
        };

        app.run().await
    });

    // The reader thread may still be blocked on stdin; returning from main
    // ends the process regardless.
    match result {
        Ok(ShutdownReason::PeerUnresponsive) => {
            warn!("Exiting: add-on stopped speaking the protocol");
            ExitCode::FAILURE
        }
        Ok(reason) => {
            info!(reason = ?reason, "Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = ?e, "App error");
            ExitCode::FAILURE
        }
    }
}
