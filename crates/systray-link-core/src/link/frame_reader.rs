//! Background frame reader.
//!
//! Runs on its own thread doing blocking reads. It owns all of its state and
//! only talks to the controller by sending [`ReaderEvent`]s over a channel.
//!
//! Stopping is cooperative: the running flag is checked between frames only,
//! so a read that is already blocked stays blocked until the stream delivers
//! data or is closed. There is no read timeout; a silent peer keeps the
//! reader parked indefinitely.

use crate::{CoreResult, LinkConfig, LinkError, ReaderEvent};

use std::{
    io::{self, ErrorKind, Read},
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
};

use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

const READER_THREAD_NAME: &str = "link-reader";

enum RawFrame {
    /// Length was zero or negative; nothing was read after the header.
    Skipped,
    /// Payload longer than the frame bound; drained without buffering.
    Oversized(usize),
    Payload(Vec<u8>),
}

/// Parses frames from the inbound stream.
pub struct FrameReader<R: Read> {
    input: R,
    events: mpsc::Sender<ReaderEvent>,
    running: Arc<AtomicBool>,
    config: LinkConfig,
    invalid_frames: u32,
    unresponsive_signalled: bool,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader that reports to `events`. The running flag starts set.
    pub fn new(input: R, events: mpsc::Sender<ReaderEvent>, config: LinkConfig) -> Self {
        Self {
            input,
            events,
            running: Arc::new(AtomicBool::new(true)),
            config,
            invalid_frames: 0,
            unresponsive_signalled: false,
        }
    }

    /// Shared handle to the running flag.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Read frames until the flag is cleared, the stream ends, or the
    /// controller hangs up. Sends [`ReaderEvent::Disconnected`] on exit.
    ///
    /// Must not be called from inside an async runtime; event delivery uses
    /// blocking sends.
    pub fn run(mut self) {
        info!("Frame reader started");

        while self.running.load(Ordering::Acquire) {
            let frame = match self.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    info!("Inbound stream reached end of file");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Inbound stream read failed");
                    break;
                }
            };

            let delivered = match frame {
                RawFrame::Skipped => true,
                RawFrame::Oversized(len) => {
                    warn!(
                        len,
                        max = self.config.max_frame_len,
                        "Dropped oversized frame"
                    );
                    self.record_invalid_frame()
                }
                RawFrame::Payload(payload) => self.handle_payload(payload),
            };

            if !delivered {
                debug!("Event channel closed, stopping frame reader");
                break;
            }
        }

        let _ = self.events.blocking_send(ReaderEvent::Disconnected);
        info!("Frame reader stopped");
    }

    fn read_frame(&mut self) -> io::Result<RawFrame> {
        let mut header = [0u8; 4];
        self.input.read_exact(&mut header)?;
        let len = i32::from_ne_bytes(header);

        if len <= 0 {
            trace!(len, "Skipping empty frame");
            return Ok(RawFrame::Skipped);
        }

        let len = len.unsigned_abs() as usize;

        if len > self.config.max_frame_len {
            let drained = io::copy(&mut (&mut self.input).take(len as u64), &mut io::sink())?;
            if drained < len as u64 {
                return Err(ErrorKind::UnexpectedEof.into());
            }
            return Ok(RawFrame::Oversized(len));
        }

        let mut payload = vec![0u8; len];
        self.input.read_exact(&mut payload)?;

        Ok(RawFrame::Payload(payload))
    }

    /// Returns false once the controller has gone away.
    fn handle_payload(&mut self, payload: Vec<u8>) -> bool {
        if payload.first() == Some(&b'{') {
            trace!(len = payload.len(), "Frame received");
            self.invalid_frames = 0;
            self.unresponsive_signalled = false;
            return self
                .events
                .blocking_send(ReaderEvent::Frame(payload))
                .is_ok();
        }

        debug!(
            len = payload.len(),
            "Frame does not start with a JSON object"
        );
        self.record_invalid_frame()
    }

    fn record_invalid_frame(&mut self) -> bool {
        self.invalid_frames = self.invalid_frames.saturating_add(1);

        if self.invalid_frames > self.config.invalid_frame_limit && !self.unresponsive_signalled {
            warn!(
                consecutive = self.invalid_frames,
                "Peer is not speaking the protocol"
            );
            self.unresponsive_signalled = true;
            return self
                .events
                .blocking_send(ReaderEvent::PeerUnresponsive {
                    invalid_frames: self.invalid_frames,
                })
                .is_ok();
        }

        true
    }
}

impl<R: Read + Send + 'static> FrameReader<R> {
    /// Move the reader onto a dedicated thread.
    #[track_caller]
    pub fn spawn(self) -> CoreResult<ReaderHandle> {
        let running = self.running_flag();

        let thread = std::thread::Builder::new()
            .name(READER_THREAD_NAME.to_string())
            .spawn(move || self.run())
            .map_err(|e| LinkError::ReaderSpawnFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(ReaderHandle { running, thread })
    }
}

/// Control handle for a spawned [`FrameReader`].
#[derive(Debug)]
pub struct ReaderHandle {
    running: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl ReaderHandle {
    /// Clear the running flag. Takes effect after the current read completes.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the running flag is still set.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Whether the reader thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}
