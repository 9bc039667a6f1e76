//! Link controller and preference synchronisation.
//!
//! Owns the outbound [`FrameWriter`] and the [`PreferenceRecord`], turns
//! reader events into [`LinkNotice`]s, and pushes local preference changes to
//! the peer once synchronisation is armed.

use crate::{
    CoreResult, FrameReader, FrameWriter, InboundMessage, LinkConfig, LinkError, LinkNotice,
    MessageCodec, PreferenceRecord, PreferenceSubscription, PreferenceUpdate, ReaderEvent,
    ReaderHandle, ShutdownReason, WindowState, link::READER_CHANNEL_CAPACITY,
};

use std::{
    io::{Read, Write},
    panic::Location,
};

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, trace, warn};

/// Whether local preference changes are sent to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Local changes update the record only.
    Suppressed,
    /// Every broadcast-worthy local change sends the full record.
    Armed,
}

/// Drives one peer connection.
pub struct LinkController<W: Write> {
    writer: Option<FrameWriter<W>>,
    reader: Option<ReaderHandle>,
    preferences: PreferenceRecord,
    changes: PreferenceSubscription,
}

impl<W: Write> LinkController<W> {
    /// Create a controller writing to `output`, with no reader attached.
    pub fn new(output: W, config: LinkConfig) -> Self {
        let mut preferences = PreferenceRecord::new();
        let changes = preferences.subscribe();

        Self {
            writer: Some(FrameWriter::new(output, config.max_frame_len)),
            reader: None,
            preferences,
            changes,
        }
    }

    /// Create a controller and spawn a reader thread on `input`.
    ///
    /// Returns the receiving end of the reader's event channel; feed each
    /// event to [`handle_reader_event`](Self::handle_reader_event).
    #[track_caller]
    #[instrument(skip(input, output))]
    pub fn start<R>(
        input: R,
        output: W,
        config: LinkConfig,
    ) -> CoreResult<(Self, mpsc::Receiver<ReaderEvent>)>
    where
        R: Read + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(READER_CHANNEL_CAPACITY);
        let reader = FrameReader::new(input, event_tx, config).spawn()?;

        let mut controller = Self::new(output, config);
        controller.reader = Some(reader);

        info!(
            max_frame_len = config.max_frame_len,
            invalid_frame_limit = config.invalid_frame_limit,
            "Link started"
        );

        Ok((controller, event_rx))
    }

    /// The preference record.
    pub fn preferences(&self) -> &PreferenceRecord {
        &self.preferences
    }

    /// Current synchronisation state.
    pub fn sync_state(&self) -> SyncState {
        if self.preferences.broadcast_enabled() {
            SyncState::Armed
        } else {
            SyncState::Suppressed
        }
    }

    /// Signal that the application is ready to sync preferences.
    pub fn arm(&mut self) {
        if self.sync_state() == SyncState::Armed {
            return;
        }
        self.preferences.set_broadcast_enabled(true);
        self.changes.drain();
        info!("Preference sync armed");
    }

    /// Whether the shutdown procedure has run.
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Apply local preference changes.
    ///
    /// While armed, each broadcast-worthy change sends the full record as it
    /// was right after that change, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if sending a frame fails. The record keeps the new
    /// values regardless.
    #[instrument(skip_all)]
    pub fn update_preferences<F>(&mut self, update: F) -> CoreResult<()>
    where
        F: FnOnce(&mut PreferenceRecord),
    {
        update(&mut self.preferences);
        self.broadcast_pending()
    }

    /// Ask the peer to restore the window or minimize it.
    #[instrument(skip(self))]
    pub fn send_window_state(&mut self, state: WindowState) -> CoreResult<()> {
        let payload = MessageCodec::encode_window_command(state)?;
        self.write_payload(&payload)
    }

    /// Ask the peer to send its stored preferences.
    #[instrument(skip(self))]
    pub fn request_preferences(&mut self) -> CoreResult<()> {
        let payload = MessageCodec::encode_preferences_request()?;
        self.write_payload(&payload)
    }

    /// React to one event from the frame reader.
    #[instrument(skip(self, event))]
    pub fn handle_reader_event(&mut self, event: ReaderEvent) -> CoreResult<Vec<LinkNotice>> {
        match event {
            ReaderEvent::Frame(payload) => self.handle_frame(&payload),
            ReaderEvent::PeerUnresponsive { invalid_frames } => {
                warn!(invalid_frames, "Peer stopped speaking the protocol");
                self.shutdown(ShutdownReason::PeerUnresponsive)?;
                Ok(vec![LinkNotice::Shutdown(ShutdownReason::PeerUnresponsive)])
            }
            ReaderEvent::Disconnected => {
                self.shutdown(ShutdownReason::Disconnected)?;
                Ok(vec![LinkNotice::Shutdown(ShutdownReason::Disconnected)])
            }
        }
    }

    /// Decode one payload and dispatch its messages.
    ///
    /// Malformed payloads are dropped and produce no notices.
    pub fn handle_frame(&mut self, payload: &[u8]) -> CoreResult<Vec<LinkNotice>> {
        let messages = match MessageCodec::decode(payload) {
            Ok(messages) => messages,
            Err(e) => {
                debug!(error = %e, len = payload.len(), "Dropping malformed payload");
                return Ok(Vec::new());
            }
        };

        let mut notices = Vec::with_capacity(messages.len());

        for message in messages {
            trace!(message = ?message, "Dispatching inbound message");
            match message {
                InboundMessage::UnreadCountUpdate(count) => {
                    notices.push(LinkNotice::UnreadMail(count));
                }
                InboundMessage::TitleUpdate(title) => notices.push(LinkNotice::Title(title)),
                InboundMessage::WindowStateUpdate(state) => {
                    notices.push(LinkNotice::WindowState(state));
                }
                InboundMessage::ShutdownRequest => {
                    self.shutdown(ShutdownReason::PeerRequested)?;
                    notices.push(LinkNotice::Shutdown(ShutdownReason::PeerRequested));
                }
                InboundMessage::PreferencesUpdate(update) => {
                    self.apply_peer_preferences(update);
                    notices.push(LinkNotice::PreferencesApplied);
                }
            }
        }

        Ok(notices)
    }

    /// Stop the reader and close the outbound stream. Idempotent.
    ///
    /// A reader blocked in a read only exits once the inbound stream
    /// delivers data or is closed.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self, reason: ShutdownReason) -> CoreResult<()> {
        if let Some(reader) = &self.reader {
            if reader.is_running() {
                reader.stop();
            }
            debug!(
                reader_finished = reader.is_finished(),
                "Frame reader stop requested"
            );
        }

        match self.writer.take() {
            Some(writer) => {
                writer.close()?;
                info!(reason = ?reason, "Link shut down");
            }
            None => debug!(reason = ?reason, "Link already shut down"),
        }

        Ok(())
    }

    /// Apply a peer update without echoing it back.
    fn apply_peer_preferences(&mut self, update: PreferenceUpdate) {
        debug!(empty = update.is_empty(), "Applying peer preferences");

        update.apply_to(&mut self.preferences);
        self.preferences.set_broadcast_enabled(true);

        let discarded = self.changes.drain().len();
        trace!(discarded, "Suppressed echo of peer preferences");
    }

    fn broadcast_pending(&mut self) -> CoreResult<()> {
        for change in self.changes.drain() {
            if !change.field.triggers_broadcast() {
                continue;
            }
            if !change.broadcast_enabled {
                trace!(field = ?change.field, "Preference sync suppressed");
                continue;
            }

            debug!(field = ?change.field, "Broadcasting preferences");
            let payload = MessageCodec::encode_preferences(&change.snapshot)?;
            self.write_payload(&payload)?;
        }

        Ok(())
    }

    #[track_caller]
    fn write_payload(&mut self, payload: &[u8]) -> CoreResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(LinkError::LinkClosed {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        match writer.write_frame(payload) {
            Err(e @ LinkError::Io { .. }) => {
                error!(error = %e, "Outbound stream failed, closing link");
                if let Some(reader) = &self.reader {
                    reader.stop();
                }
                self.writer = None;
                Err(e)
            }
            result => result,
        }
    }
}
