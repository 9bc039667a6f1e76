//! SysTray link core library
//!
//! Native messaging link between the mail client add-on and the tray
//! companion process: length-prefixed JSON frames over stdin/stdout, a
//! tolerant message codec, and preference synchronisation.
//!
//! # Example
//!
//! ```no_run
//! use systray_link_core::{CoreResult, LinkConfig, LinkController, LinkNotice};
//!
//! fn main() -> CoreResult<()> {
//!     let (mut link, mut events) =
//!         LinkController::start(std::io::stdin(), std::io::stdout(), LinkConfig::default())?;
//!     link.request_preferences()?;
//!
//!     while let Some(event) = events.blocking_recv() {
//!         for notice in link.handle_reader_event(event)? {
//!             if let LinkNotice::Shutdown(reason) = notice {
//!                 println!("Link closed: {reason:?}");
//!                 return Ok(());
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod link;
mod preferences;

pub use {
    error::LinkError,
    error::Result as CoreResult,
    link::{
        DEFAULT_INVALID_FRAME_LIMIT, DEFAULT_MAX_FRAME_LEN, FrameReader, FrameWriter,
        InboundMessage, LinkConfig, LinkController, LinkNotice, MessageCodec, PreferenceUpdate,
        ReaderEvent, ReaderHandle, ShutdownReason, SyncState, WindowState,
    },
    preferences::{
        DEFAULT_ICON_MIME, IconType, PreferenceChange, PreferenceField, PreferenceRecord,
        PreferenceSubscription, Preferences,
    },
};
