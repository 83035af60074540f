use crate::models::artifact::CapturedArtifact;
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;

/// Event delegate for capture session notifications.
///
/// Device events (stream ended) are reported from the device's thread, so
/// implementations should marshal to the UI thread if needed. The session
/// never holds its internal lock while calling into the delegate.
pub trait CaptureDelegate: Send + Sync {
    /// Called with every produced artifact. Ownership moves to the host.
    fn on_artifact(&self, artifact: CapturedArtifact);

    /// Called when the camera becomes usable or unusable.
    fn on_availability_changed(&self, available: bool);

    /// Called when the session state changes.
    fn on_state_changed(&self, _state: &CaptureState) {}

    /// Called when an operation fails.
    fn on_error(&self, _error: &CaptureError) {}
}
