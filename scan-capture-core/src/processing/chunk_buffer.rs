/// Ordered, append-only buffer of encoded recording chunks.
///
/// Chunks are kept in arrival order and concatenated in that order on
/// `finalize`. Wrap in `Arc<parking_lot::Mutex<_>>` when the recorder
/// delivers from another thread.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Vec<u8>>,
    byte_len: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Empty chunks carry no media and are dropped.
    pub fn append(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.byte_len += chunk.len();
        self.chunks.push(chunk);
    }

    /// Concatenate all chunks into one blob and leave the buffer empty.
    pub fn finalize(&mut self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.byte_len);
        for chunk in self.chunks.drain(..) {
            blob.extend_from_slice(&chunk);
        }
        self.byte_len = 0;
        blob
    }

    /// Number of chunks held.
    pub fn count(&self) -> usize {
        self.chunks.len()
    }

    /// Total bytes held.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Drop everything without producing a blob.
    pub fn reset(&mut self) {
        self.chunks.clear();
        self.byte_len = 0;
    }
}
