use std::sync::Arc;

use async_trait::async_trait;

use crate::models::error::CaptureError;
use crate::models::media::{FacingMode, StreamConstraints, VideoFrame};

/// Events a device stream pushes back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An encoded recording chunk, in encoder emission order.
    Chunk(Vec<u8>),
    /// The device went away (unplugged, permission revoked).
    Ended,
}

/// Callback invoked by a stream for every event.
///
/// May fire on a device thread. Calls for one stream must not overlap, so
/// chunk order is the call order.
pub type StreamEventCallback = Arc<dyn Fn(StreamEvent) + Send + Sync + 'static>;

/// Entry point to the platform media subsystem.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Acquire a camera (and optionally microphone) stream.
    ///
    /// Fails with `PermissionDenied` or `DeviceUnavailable`.
    async fn acquire(
        &self,
        constraints: &StreamConstraints,
        events: StreamEventCallback,
    ) -> Result<Box<dyn MediaStream>, CaptureError>;
}

/// A live device stream.
///
/// Exclusively owned by one capture session; methods take `&self` so the
/// session can await the recorder without holding its lock.
#[async_trait]
pub trait MediaStream: Send + Sync {
    fn facing_mode(&self) -> FacingMode;

    /// Sample the current video frame, if one has been rendered.
    fn grab_frame(&self) -> Option<VideoFrame>;

    fn supports_recording(&self, mime_type: &str) -> bool;

    /// Begin emitting `StreamEvent::Chunk` events.
    fn start_recorder(&self, mime_type: &str) -> Result<(), CaptureError>;

    /// Stop the recorder. Resolves after the final chunk has been delivered.
    async fn stop_recorder(&self) -> Result<(), CaptureError>;

    /// Stop all tracks, including a running recorder. Called exactly once
    /// per acquired stream, possibly from inside the event callback.
    fn release(&self);
}
