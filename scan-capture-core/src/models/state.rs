/// Capture session state machine.
///
/// State transitions:
/// ```text
/// closed → acquiring → live ⇄ recording → finalizing → live
///              ↓                    ↓
///         unavailable ←── (device lost)
///
/// close(): any state → closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    Closed,
    Acquiring,
    Live,
    Recording,
    /// Waiting for the recorder to flush its last chunk.
    Finalizing,
    /// Acquisition failed or the device went away. Left only by `open` or `close`.
    Unavailable,
}

impl CaptureState {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    /// States in which the session holds a device stream.
    pub fn holds_stream(&self) -> bool {
        matches!(self, Self::Live | Self::Recording | Self::Finalizing)
    }

    /// States from which `open` may be called.
    pub fn can_open(&self) -> bool {
        matches!(self, Self::Closed | Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_only_after_close_or_failure() {
        assert!(CaptureState::Closed.can_open());
        assert!(CaptureState::Unavailable.can_open());
        assert!(!CaptureState::Acquiring.can_open());
        assert!(!CaptureState::Live.can_open());
        assert!(!CaptureState::Recording.can_open());
    }

    #[test]
    fn stream_holding_states() {
        assert!(CaptureState::Live.holds_stream());
        assert!(CaptureState::Recording.holds_stream());
        assert!(CaptureState::Finalizing.holds_stream());
        assert!(!CaptureState::Acquiring.holds_stream());
        assert!(!CaptureState::Unavailable.holds_stream());
    }
}
