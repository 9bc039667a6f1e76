use crate::{CoreResult, LinkError};

use std::{io::Write, panic::Location};

use error_location::ErrorLocation;
use tracing::{debug, instrument, trace};

/// Writes length-prefixed frames to the outbound stream.
///
/// The length is a 32-bit signed integer in native byte order, matching what
/// the peer on the same machine expects. Not portable across endianness.
///
/// Only one writer may exist per stream; the controller owns it and is the
/// sole caller, so frames never interleave.
#[derive(Debug)]
pub struct FrameWriter<W: Write> {
    output: W,
    max_frame_len: usize,
}

impl<W: Write> FrameWriter<W> {
    /// Wrap an outbound stream.
    pub fn new(output: W, max_frame_len: usize) -> Self {
        Self {
            output,
            max_frame_len,
        }
    }

    /// Write one frame and flush.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::FrameTooLarge`] without writing anything if the
    /// payload does not fit, or [`LinkError::Io`] if the stream fails.
    #[track_caller]
    #[instrument(skip(self, payload), fields(len = payload.len()))]
    pub fn write_frame(&mut self, payload: &[u8]) -> CoreResult<()> {
        let len = i32::try_from(payload.len())
            .ok()
            .filter(|_| payload.len() <= self.max_frame_len)
            .ok_or_else(|| LinkError::FrameTooLarge {
                len: payload.len(),
                max: self.max_frame_len,
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.output.write_all(&len.to_ne_bytes())?;
        self.output.write_all(payload)?;
        self.output.flush()?;

        trace!("Frame written");

        Ok(())
    }

    /// Flush and release the outbound stream.
    #[track_caller]
    pub fn close(mut self) -> CoreResult<W> {
        self.output.flush()?;
        debug!("Outbound stream closed");
        Ok(self.output)
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &W {
        &self.output
    }
}
