use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::artifact::CapturedArtifact;
use crate::models::error::CaptureError;
use crate::storage::metadata::{self, ArtifactMetadata};

/// A saved artifact and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub path: PathBuf,
    pub metadata: ArtifactMetadata,
}

/// Writes artifacts into a directory under unique `<millis>-<uuid>.<ext>`
/// names, each with a SHA-256 checksum and a JSON metadata sidecar.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn save(&self, artifact: &CapturedArtifact) -> Result<StoredArtifact, CaptureError> {
        fs::create_dir_all(&self.directory)
            .map_err(|e| CaptureError::StorageError(format!("failed to create directory: {}", e)))?;

        let id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();
        let file_name = match artifact.extension() {
            Some(ext) => format!("{}-{}.{}", now.timestamp_millis(), id.simple(), ext),
            None => format!("{}-{}", now.timestamp_millis(), id.simple()),
        };
        let path = self.directory.join(file_name);

        fs::write(&path, artifact.data())
            .map_err(|e| CaptureError::StorageError(format!("failed to write artifact: {}", e)))?;

        let metadata = ArtifactMetadata {
            id: id.to_string(),
            original_name: artifact.name().to_string(),
            mime_type: artifact.mime_type().to_string(),
            byte_len: artifact.byte_len() as u64,
            checksum: sha256_hex(artifact.data()),
            created_at: now,
            file_path: path.to_string_lossy().into_owned(),
        };
        metadata::write_metadata(&metadata, &path)?;

        log::debug!("Stored artifact {} at {}", artifact.name(), path.display());
        Ok(StoredArtifact { path, metadata })
    }
}

fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data).iter().map(|b| format!("{:02x}", b)).collect()
}
