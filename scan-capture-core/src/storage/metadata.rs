use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::error::CaptureError;

/// Describes a stored artifact; kept next to it so uploads can be verified later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub byte_len: u64,
    /// SHA-256, lowercase hex.
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    pub file_path: String,
}

/// Sidecar path for a stored artifact: `<file>.metadata.json`.
pub fn metadata_path(artifact_path: &Path) -> PathBuf {
    let mut name = artifact_path.as_os_str().to_os_string();
    name.push(".metadata.json");
    PathBuf::from(name)
}

/// Save `metadata` as pretty JSON beside the artifact at `artifact_path`.
pub fn write_metadata(metadata: &ArtifactMetadata, artifact_path: &Path) -> Result<(), CaptureError> {
    let sidecar = metadata_path(artifact_path);
    let json = serde_json::to_string_pretty(metadata).map_err(|e| {
        CaptureError::StorageError(format!("cannot encode metadata for artifact {}: {}", metadata.id, e))
    })?;
    fs::write(&sidecar, json).map_err(|e| {
        CaptureError::StorageError(format!("cannot write artifact sidecar {}: {}", sidecar.display(), e))
    })
}

/// Load the sidecar of the artifact stored at `artifact_path`.
pub fn read_metadata(artifact_path: &Path) -> Result<ArtifactMetadata, CaptureError> {
    let sidecar = metadata_path(artifact_path);
    let json = fs::read_to_string(&sidecar).map_err(|e| {
        CaptureError::StorageError(format!("no readable sidecar for artifact {}: {}", artifact_path.display(), e))
    })?;
    serde_json::from_str(&json).map_err(|e| {
        CaptureError::StorageError(format!("corrupt artifact sidecar {}: {}", sidecar.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_keeps_original_extension() {
        let path = Path::new("/tmp/uploads/123-abc.jpg");
        assert_eq!(metadata_path(path), PathBuf::from("/tmp/uploads/123-abc.jpg.metadata.json"));
    }

    #[test]
    fn created_at_is_rfc3339_in_json() {
        let metadata = ArtifactMetadata {
            id: "id".into(),
            original_name: "scan-1.jpg".into(),
            mime_type: "image/jpeg".into(),
            byte_len: 1,
            checksum: "00".into(),
            created_at: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap(),
            file_path: "/tmp/x.jpg".into(),
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["created_at"], "2023-11-14T22:13:20Z");

        let back: ArtifactMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }
}
