mod codec;
mod frame_reader;
mod frame_writer;
mod inbound_message;
mod link_config;
mod link_controller;
mod link_notice;
mod preference_update;
mod reader_event;
mod window_state;

pub use {
    codec::MessageCodec,
    frame_reader::{FrameReader, ReaderHandle},
    frame_writer::FrameWriter,
    inbound_message::InboundMessage,
    link_config::{DEFAULT_INVALID_FRAME_LIMIT, DEFAULT_MAX_FRAME_LEN, LinkConfig},
    link_controller::{LinkController, SyncState},
    link_notice::{LinkNotice, ShutdownReason},
    preference_update::PreferenceUpdate,
    reader_event::ReaderEvent,
    window_state::WindowState,
};

/// Capacity of the reader-to-controller event channel.
pub const READER_CHANNEL_CAPACITY: usize = 32;
