use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::models::artifact::{ArtifactKind, CapturedArtifact, JPEG_MIME_TYPE};
use crate::models::config::SessionConfig;
use crate::models::error::CaptureError;
use crate::models::media::{FacingMode, StreamConstraints};
use crate::models::state::CaptureState;
use crate::processing::artifact_namer::ArtifactNamer;
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::processing::photo_encoder;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::media_devices::{MediaDevices, MediaStream, StreamEvent, StreamEventCallback};

/// Pending delegate call, collected under the lock and delivered after it is released.
enum Notice {
    State(CaptureState),
    Availability(bool),
    Artifact(CapturedArtifact),
    Error(CaptureError),
}

/// Internal mutable session state, protected by `parking_lot::Mutex`.
struct SessionState {
    state: CaptureState,
    facing_mode: FacingMode,
    available: bool,
    stream: Option<Arc<dyn MediaStream>>,
    // Bumped by every open, close and device loss. Async work started under an
    // older generation must not touch the session when it resumes.
    generation: u64,
    recording: ChunkBuffer,
    namer: ArtifactNamer,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl SessionState {
    fn new(config: &SessionConfig) -> Self {
        Self {
            state: CaptureState::Closed,
            facing_mode: config.facing_mode,
            available: true,
            stream: None,
            generation: 0,
            recording: ChunkBuffer::new(),
            namer: ArtifactNamer::new(config.artifact_prefix.clone()),
            delegate: None,
        }
    }

    fn transition(&mut self, next: CaptureState, notices: &mut Vec<Notice>) {
        if self.state != next {
            log::debug!("Capture session {:?} -> {:?}", self.state, next);
            self.state = next;
            notices.push(Notice::State(next));
        }
    }

    fn set_available(&mut self, available: bool, notices: &mut Vec<Notice>) {
        if self.available != available {
            self.available = available;
            notices.push(Notice::Availability(available));
        }
    }

    fn invalid(&self, operation: &'static str, notices: &mut Vec<Notice>) -> CaptureError {
        let error = CaptureError::InvalidState {
            operation,
            state: self.state,
        };
        notices.push(Notice::Error(error.clone()));
        error
    }
}

/// Lock the session, apply `f`, then deliver whatever it queued to the delegate.
fn update<R>(
    session_state: &Mutex<SessionState>,
    f: impl FnOnce(&mut SessionState, &mut Vec<Notice>) -> R,
) -> R {
    let mut notices = Vec::new();
    let (result, delegate) = {
        let mut s = session_state.lock();
        let result = f(&mut *s, &mut notices);
        (result, s.delegate.clone())
    };
    dispatch(delegate.as_deref(), notices);
    result
}

fn dispatch(delegate: Option<&dyn CaptureDelegate>, notices: Vec<Notice>) {
    let Some(delegate) = delegate else {
        for notice in notices {
            if let Notice::Artifact(artifact) = notice {
                log::warn!("No delegate installed, dropping artifact {}", artifact.name());
            }
        }
        return;
    };
    for notice in notices {
        match notice {
            Notice::State(state) => delegate.on_state_changed(&state),
            Notice::Availability(available) => delegate.on_availability_changed(available),
            Notice::Artifact(artifact) => delegate.on_artifact(artifact),
            Notice::Error(error) => delegate.on_error(&error),
        }
    }
}

/// Device reported that the stream of `generation` ended on its own.
fn handle_stream_ended(session_state: &Mutex<SessionState>, generation: u64) {
    let stream = update(session_state, |s, notices| {
        if s.generation != generation || !s.state.holds_stream() {
            return None;
        }
        log::warn!("Camera stream ended unexpectedly in state {:?}", s.state);
        if !s.recording.is_empty() {
            log::info!(
                "Discarding partial recording ({} chunks, {} bytes)",
                s.recording.count(),
                s.recording.byte_len()
            );
        }
        s.generation += 1;
        s.recording.reset();
        s.transition(CaptureState::Unavailable, notices);
        s.set_available(false, notices);
        notices.push(Notice::Error(CaptureError::DeviceLost));
        s.stream.take()
    });
    if let Some(stream) = stream {
        stream.release();
    }
}

/// Camera capture session: owns one device stream at a time and turns it
/// into photo and video artifacts.
///
/// ```text
/// [MediaDevices] ──acquire──▶ [MediaStream] ──frames──▶ JPEG ──┐
///                                  │                            ├─▶ CaptureDelegate::on_artifact
///                                  └──chunks──▶ [ChunkBuffer] ──┘
/// ```
///
/// Methods take `&self`; share the session behind an `Arc` to close it while
/// an `open` is still waiting on the device.
pub struct CaptureSession<D: MediaDevices> {
    devices: D,
    config: SessionConfig,
    session_state: Arc<Mutex<SessionState>>,
}

impl<D: MediaDevices> CaptureSession<D> {
    pub fn new(devices: D, config: SessionConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        let session_state = Arc::new(Mutex::new(SessionState::new(&config)));
        Ok(Self {
            devices,
            config,
            session_state,
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn CaptureDelegate>) {
        self.session_state.lock().delegate = Some(delegate);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> CaptureState {
        self.session_state.lock().state
    }

    /// False after an acquisition failure or device loss, until the next successful `open`.
    pub fn is_available(&self) -> bool {
        self.session_state.lock().available
    }

    /// Facing mode of the current or most recently requested stream.
    pub fn facing_mode(&self) -> FacingMode {
        self.session_state.lock().facing_mode
    }

    pub fn buffered_chunks(&self) -> usize {
        self.session_state.lock().recording.count()
    }

    pub fn buffered_bytes(&self) -> usize {
        self.session_state.lock().recording.byte_len()
    }

    /// Acquire a stream facing `facing_mode`. Transitions: closed/unavailable → acquiring → live.
    ///
    /// On failure (permission denied, no device, timeout) the session becomes
    /// `Unavailable` and availability turns false. Nothing is retried.
    pub async fn open(&self, facing_mode: FacingMode) -> Result<(), CaptureError> {
        let generation = update(&self.session_state, |s, notices| {
            if !s.state.can_open() {
                return Err(s.invalid("open", notices));
            }
            s.generation += 1;
            s.facing_mode = facing_mode;
            s.transition(CaptureState::Acquiring, notices);
            Ok(s.generation)
        })?;

        let constraints = StreamConstraints {
            facing_mode,
            audio: self.config.audio,
        };
        log::info!("Requesting {} camera (audio: {})", facing_mode.as_str(), constraints.audio);

        let events = self.event_callback(generation);
        let acquisition = self.devices.acquire(&constraints, events);
        let result = match self.config.open_timeout() {
            Some(limit) => tokio::time::timeout(limit, acquisition)
                .await
                .unwrap_or(Err(CaptureError::Timeout)),
            None => acquisition.await,
        };

        let orphan = update(&self.session_state, |s, notices| {
            if s.generation != generation {
                return Err(result.ok());
            }
            match result {
                Ok(stream) => {
                    log::info!("Camera live, facing {}", stream.facing_mode().as_str());
                    s.stream = Some(Arc::from(stream));
                    s.transition(CaptureState::Live, notices);
                    s.set_available(true, notices);
                    Ok(Ok(()))
                }
                Err(error) => {
                    log::warn!("Camera not available: {}", error);
                    s.transition(CaptureState::Unavailable, notices);
                    s.set_available(false, notices);
                    notices.push(Notice::Error(error.clone()));
                    Ok(Err(error))
                }
            }
        });

        match orphan {
            Ok(outcome) => outcome,
            Err(late_stream) => {
                // Closed (or reopened) while the device was still answering.
                if let Some(stream) = late_stream {
                    log::debug!("Releasing stream acquired after the session was closed");
                    stream.release();
                }
                Err(CaptureError::Cancelled)
            }
        }
    }

    /// Release the stream and clear buffers. Valid from any state; idempotent.
    ///
    /// A pending `open` releases its stream when it resolves. A recording in
    /// progress is dropped without producing an artifact.
    pub fn close(&self) {
        let stream = update(&self.session_state, |s, notices| {
            if s.state.is_closed() {
                return None;
            }
            s.generation += 1;
            s.recording.reset();
            s.transition(CaptureState::Closed, notices);
            s.stream.take()
        });
        if let Some(stream) = stream {
            stream.release();
        }
    }

    /// Close, then open the other camera. A recording in progress is
    /// finalized and discarded first.
    ///
    /// If the session is closed or loses its device while the recording is
    /// being finalized, the switch is abandoned with `Cancelled` and no new
    /// stream is requested.
    pub async fn switch_facing(&self) -> Result<(), CaptureError> {
        let (state, facing_mode, generation) = update(&self.session_state, |s, notices| {
            if !matches!(s.state, CaptureState::Live | CaptureState::Recording) {
                return Err(s.invalid("switch_facing", notices));
            }
            Ok((s.state, s.facing_mode, s.generation))
        })?;

        if state.is_recording() {
            match self.drain_recording("switch_facing").await {
                Ok(data) => log::info!("Discarded {} byte recording on camera switch", data.len()),
                Err(e) => log::warn!("Recording could not be finalized before camera switch: {}", e),
            }
        }

        let superseded = {
            let s = self.session_state.lock();
            s.generation != generation || !s.state.holds_stream()
        };
        if superseded {
            log::info!("Camera switch abandoned, session left {:?}", self.state());
            return Err(CaptureError::Cancelled);
        }

        self.close();
        self.open(facing_mode.toggled()).await
    }

    /// Grab the current frame as a JPEG artifact. No state change.
    pub fn capture_photo(&self) -> Result<(), CaptureError> {
        let stream = update(&self.session_state, |s, notices| match s.stream.clone() {
            Some(stream) if s.state.holds_stream() => Ok(stream),
            _ => Err(s.invalid("capture_photo", notices)),
        })?;

        let encoded = stream
            .grab_frame()
            .ok_or(CaptureError::NoLiveFrame)
            .and_then(|frame| photo_encoder::encode_jpeg(&frame, self.config.jpeg_quality));

        update(&self.session_state, |s, notices| match encoded {
            Ok(jpeg) => {
                let now = Utc::now();
                let name = s.namer.next_name("jpg", now);
                log::info!("Captured photo {} ({} bytes)", name, jpeg.len());
                let artifact = CapturedArtifact::new(name, JPEG_MIME_TYPE, ArtifactKind::Photo, jpeg, now);
                notices.push(Notice::Artifact(artifact));
                Ok(())
            }
            Err(error) => {
                log::warn!("Photo capture failed: {}", error);
                notices.push(Notice::Error(error.clone()));
                Err(error)
            }
        })
    }

    /// Start buffering recorder chunks. Transitions: live → recording.
    pub fn start_recording(&self) -> Result<(), CaptureError> {
        let mime_type = self.config.recorder_mime_type.as_str();

        let (stream, generation) = update(&self.session_state, |s, notices| {
            let stream = match s.stream.clone() {
                Some(stream) if s.state.is_live() => stream,
                _ => return Err(s.invalid("start_recording", notices)),
            };
            if !stream.supports_recording(mime_type) {
                let error = CaptureError::EncodingUnsupported(mime_type.to_string());
                log::error!("Recorder error: {}", error);
                notices.push(Notice::Error(error.clone()));
                return Err(error);
            }
            s.recording.reset();
            s.transition(CaptureState::Recording, notices);
            Ok((stream, s.generation))
        })?;

        if let Err(error) = stream.start_recorder(mime_type) {
            log::error!("Recorder failed to start: {}", error);
            return update(&self.session_state, |s, notices| {
                if s.generation == generation && s.state.is_recording() {
                    s.recording.reset();
                    s.transition(CaptureState::Live, notices);
                }
                notices.push(Notice::Error(error.clone()));
                Err(error)
            });
        }
        log::info!("Recording started ({})", mime_type);
        Ok(())
    }

    /// Finalize the recording into one video artifact.
    /// Transitions: recording → finalizing → live.
    ///
    /// A recording with no chunks still yields a (zero-length) artifact.
    pub async fn stop_recording(&self) -> Result<(), CaptureError> {
        let data = self.drain_recording("stop_recording").await?;

        update(&self.session_state, |s, notices| {
            let now = Utc::now();
            let name = s.namer.next_name("webm", now);
            log::info!("Recording finished {} ({} bytes)", name, data.len());
            let artifact = CapturedArtifact::new(
                name,
                self.config.video_mime_type.clone(),
                ArtifactKind::Video,
                data,
                now,
            );
            notices.push(Notice::Artifact(artifact));
        });
        Ok(())
    }

    /// Stop the recorder, wait for its last chunk and take the assembled bytes.
    async fn drain_recording(&self, operation: &'static str) -> Result<Vec<u8>, CaptureError> {
        let (stream, generation) = update(&self.session_state, |s, notices| {
            let stream = match s.stream.clone() {
                Some(stream) if s.state.is_recording() => stream,
                _ => return Err(s.invalid(operation, notices)),
            };
            s.transition(CaptureState::Finalizing, notices);
            Ok((stream, s.generation))
        })?;

        let flushed = stream.stop_recorder().await;

        update(&self.session_state, |s, notices| {
            if s.generation != generation {
                // Closed or lost while flushing; the buffer is already gone.
                return Err(CaptureError::Cancelled);
            }
            let data = s.recording.finalize();
            s.transition(CaptureState::Live, notices);
            match flushed {
                Ok(()) => Ok(data),
                Err(error) => {
                    log::error!("Recorder failed to stop cleanly, discarding {} bytes: {}", data.len(), error);
                    notices.push(Notice::Error(error.clone()));
                    Err(error)
                }
            }
        })
    }

    fn event_callback(&self, generation: u64) -> StreamEventCallback {
        let session_state = Arc::clone(&self.session_state);
        Arc::new(move |event: StreamEvent| match event {
            StreamEvent::Chunk(chunk) => {
                let mut s = session_state.lock();
                let recording = matches!(s.state, CaptureState::Recording | CaptureState::Finalizing);
                if s.generation == generation && recording {
                    s.recording.append(chunk);
                } else {
                    log::trace!("Ignoring {} byte chunk outside a recording", chunk.len());
                }
            }
            StreamEvent::Ended => handle_stream_ended(&session_state, generation),
        })
    }
}

impl<D: MediaDevices> Drop for CaptureSession<D> {
    fn drop(&mut self) {
        let stream = {
            let mut s = self.session_state.lock();
            s.generation += 1;
            s.recording.reset();
            s.state = CaptureState::Closed;
            s.stream.take()
        };
        if let Some(stream) = stream {
            stream.release();
        }
    }
}
