use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::artifact::WEBM_MIME_TYPE;
use super::error::CaptureError;
use super::media::FacingMode;

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Camera requested by the first `open` (default: rear).
    pub facing_mode: FacingMode,

    /// Request a microphone track alongside video (default: true).
    pub audio: bool,

    /// Upper bound on waiting for device acquisition, in milliseconds.
    /// `None` waits forever.
    pub open_timeout_ms: Option<u64>,

    /// JPEG quality for still photos, 1–100 (default: 92).
    pub jpeg_quality: u8,

    /// MIME type requested from the recorder.
    pub recorder_mime_type: String,

    /// MIME type stamped on finished video artifacts.
    pub video_mime_type: String,

    /// Prefix of synthetic artifact names (`<prefix>-<millis>.<ext>`).
    pub artifact_prefix: String,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!("jpeg quality out of range: {}", self.jpeg_quality));
        }
        if self.open_timeout_ms == Some(0) {
            return Err("open timeout must be positive".into());
        }
        if self.recorder_mime_type.trim().is_empty() || self.video_mime_type.trim().is_empty() {
            return Err("mime types must not be empty".into());
        }
        if self.artifact_prefix.is_empty() || self.artifact_prefix.contains(['/', '\\']) {
            return Err(format!("invalid artifact prefix: {:?}", self.artifact_prefix));
        }
        Ok(())
    }

    pub fn open_timeout(&self) -> Option<Duration> {
        self.open_timeout_ms.map(Duration::from_millis)
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CaptureError::ConfigurationFailed(format!("invalid config: {}", e)))?;
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(config)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            audio: true,
            open_timeout_ms: Some(10_000),
            jpeg_quality: 92,
            recorder_mime_type: "video/webm;codecs=vp8,opus".into(),
            video_mime_type: WEBM_MIME_TYPE.into(),
            artifact_prefix: "scan".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jpeg_quality, 92);
        assert_eq!(config.open_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn rejects_bad_values() {
        let config = SessionConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            open_timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            artifact_prefix: "a/b".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = SessionConfig::from_json(r#"{ "facing_mode": "user", "audio": false }"#).unwrap();
        assert_eq!(config.facing_mode, FacingMode::User);
        assert!(!config.audio);
        assert_eq!(config.jpeg_quality, 92);
        assert_eq!(config.artifact_prefix, "scan");
    }

    #[test]
    fn from_json_validates() {
        let err = SessionConfig::from_json(r#"{ "jpeg_quality": 150 }"#).unwrap_err();
        assert!(matches!(err, CaptureError::ConfigurationFailed(_)));

        let err = SessionConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, CaptureError::ConfigurationFailed(_)));
    }
}
