use thiserror::Error;

use super::state::CaptureState;

/// Errors that can occur during capture operations.
///
/// All of them are local to a session; none are process-fatal. The host
/// decides how to word them for the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("device lost")]
    DeviceLost,

    #[error("encoding unsupported: {0}")]
    EncodingUnsupported(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("no live frame available")]
    NoLiveFrame,

    #[error("{operation} is not valid in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: CaptureState,
    },

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("timeout")]
    Timeout,

    #[error("cancelled")]
    Cancelled,
}

impl CaptureError {
    /// Whether this error means the camera cannot be used right now
    /// (the "camera not available" signal).
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::DeviceUnavailable(_) | Self::DeviceLost | Self::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_kinds() {
        assert!(CaptureError::PermissionDenied.is_unavailable());
        assert!(CaptureError::DeviceUnavailable("no camera".into()).is_unavailable());
        assert!(CaptureError::Timeout.is_unavailable());
        assert!(!CaptureError::NoLiveFrame.is_unavailable());
        assert!(!CaptureError::EncodingUnsupported("video/webm".into()).is_unavailable());
    }

    #[test]
    fn invalid_state_message() {
        let err = CaptureError::InvalidState {
            operation: "start_recording",
            state: CaptureState::Closed,
        };
        assert_eq!(err.to_string(), "start_recording is not valid in state Closed");
    }
}
