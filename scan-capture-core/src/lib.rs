//! # scan-capture-core
//!
//! Camera capture core for the scan flow.
//!
//! Owns the lifecycle of one camera/microphone stream (acquire → preview →
//! capture/record → release) and hands every photo or video it produces to a
//! host through `CaptureDelegate`. Platform media backends implement
//! `MediaDevices`/`MediaStream` and plug into the generic `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! scan-capture-core (this crate)
//! ├── traits/       ← MediaDevices, MediaStream, CaptureDelegate, Classifier, KeyValueStore
//! ├── models/       ← CaptureError, CaptureState, SessionConfig, CapturedArtifact, FacingMode, etc.
//! ├── processing/   ← JPEG encoding, ChunkBuffer, ArtifactNamer, DemoClassifier
//! ├── session/      ← CaptureSession (state machine)
//! └── storage/      ← ArtifactStore, metadata sidecars, ScanLog, MemoryStore
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::artifact::{ArtifactKind, CapturedArtifact, JPEG_MIME_TYPE, WEBM_MIME_TYPE};
pub use models::config::SessionConfig;
pub use models::error::CaptureError;
pub use models::media::{FacingMode, StreamConstraints, VideoFrame};
pub use models::prediction::Prediction;
pub use models::state::CaptureState;
pub use processing::chunk_buffer::ChunkBuffer;
pub use processing::demo_classifier::DemoClassifier;
pub use session::capture::CaptureSession;
pub use storage::artifact_store::{ArtifactStore, StoredArtifact};
pub use storage::memory_store::MemoryStore;
pub use storage::metadata::ArtifactMetadata;
pub use storage::scan_log::{ScanLog, ScanLogEntry};
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::classifier::Classifier;
pub use traits::key_value_store::KeyValueStore;
pub use traits::media_devices::{MediaDevices, MediaStream, StreamEvent, StreamEventCallback};
