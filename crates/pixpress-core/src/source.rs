//! Caller-supplied input for one pipeline run.

/// Raw image bytes plus what the caller knows about them.
///
/// Immutable once constructed; a pipeline run only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    bytes: Vec<u8>,
    mime_type: String,
    original_size: u64,
}

impl SourceImage {
    /// Create a source from raw bytes, declared MIME type and original size.
    ///
    /// `original_size` is the size the caller reports for the file (used
    /// for the compression ratio) and may differ from `bytes.len()`.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, original_size: u64) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            original_size,
        }
    }

    /// Create a source whose original size is the length of `bytes`.
    pub fn from_bytes(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        let original_size = bytes.len() as u64;
        Self::new(bytes, mime_type, original_size)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    /// Whether the declared MIME type is an `image/*` type.
    ///
    /// Callers filter on this before invoking the pipeline; the pipeline
    /// itself relies on decoding to reject non-images.
    pub fn has_image_mime_type(&self) -> bool {
        self.mime_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}
