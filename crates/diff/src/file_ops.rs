use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;

/// Decides whether a buffer should be compared line by line at all.
///
/// No detector ships with this crate; callers that care about binary input
/// supply one to [`DiffEngine::with_binary_detector`](crate::DiffEngine::with_binary_detector).
pub trait BinaryDetector: Send + Sync {
    fn is_binary(&self, bytes: &[u8]) -> bool;
}

impl<F> BinaryDetector for F
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    fn is_binary(&self, bytes: &[u8]) -> bool {
        self(bytes)
    }
}

/// Read a whole file.
pub fn try_read_buffer(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Read a whole file, treating a missing or unreadable file as empty.
///
/// Comparing against a missing file therefore reports every line of the
/// other side as added or removed instead of failing.
pub fn read_buffer(path: impl AsRef<Path>) -> Vec<u8> {
    match try_read_buffer(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("{err:#}; comparing as an empty buffer");
            Vec::new()
        }
    }
}

/// Decode file bytes for display; invalid UTF-8 becomes U+FFFD.
pub fn decode_buffer(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
