use chrono::{DateTime, Utc};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const WEBM_MIME_TYPE: &str = "video/webm";

/// What produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Photo,
    Video,
}

/// An immutable named blob produced by a capture operation.
///
/// Handed to the host by value; the session keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedArtifact {
    name: String,
    mime_type: String,
    kind: ArtifactKind,
    data: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl CapturedArtifact {
    pub fn new(
        name: String,
        mime_type: impl Into<String>,
        kind: ArtifactKind,
        data: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            mime_type: mime_type.into(),
            kind,
            data,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// File extension taken from the artifact name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
