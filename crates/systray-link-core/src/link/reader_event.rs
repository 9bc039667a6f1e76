/// Events handed from the frame reader thread to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    /// A payload that looks like a JSON object.
    Frame(Vec<u8>),
    /// Too many consecutive invalid frames; the peer no longer speaks the protocol.
    PeerUnresponsive {
        /// Length of the invalid streak when the signal fired.
        invalid_frames: u32,
    },
    /// The inbound stream ended or failed. Always the last event.
    Disconnected,
}
