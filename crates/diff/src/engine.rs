use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::buffer_diff::DiffResult;
use crate::file_ops::{decode_buffer, read_buffer, BinaryDetector};
use crate::lines::{split_line_bytes, split_lines};
use crate::matcher::SequenceMatcher;
use crate::options::DiffOptions;
use crate::reconstruct::{identical, reconstruct};

/// Compares buffers and files under a fixed set of options.
///
/// An engine is an immutable value: to compare under different options,
/// build another one with [`DiffEngine::with_options`]. Engines are cheap to
/// clone and can be shared between threads.
#[derive(Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
    binary_detector: Option<Arc<dyn BinaryDetector>>,
}

impl fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffEngine")
            .field("options", &self.options)
            .field("binary_detector", &self.binary_detector.is_some())
            .finish()
    }
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            binary_detector: None,
        }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// A copy of this engine using different options
    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Check file contents with `detector` before comparing them as text
    pub fn with_binary_detector(mut self, detector: impl BinaryDetector + 'static) -> Self {
        self.binary_detector = Some(Arc::new(detector));
        self
    }

    /// Compare two in-memory buffers with the configured algorithm
    pub fn compare_buffers(&self, left: &str, right: &str) -> DiffResult {
        self.compare_with(&self.options.algorithm, left, right)
    }

    /// Compare two raw buffers.
    ///
    /// Rows show the text decoded lossily, but lines are matched by their
    /// bytes: two lines that only differ in invalid UTF-8 are still different.
    pub fn compare_bytes(&self, left: &[u8], right: &[u8]) -> DiffResult {
        self.compare_with(&self.options.algorithm, left, right)
    }

    /// Compare two buffers with a caller-supplied matcher.
    ///
    /// # Panics
    ///
    /// Panics if `matcher` returns a hunk list that does not describe the
    /// two buffers (see [`validate_hunks`](crate::validate_hunks)).
    pub fn compare_with<M, L, R>(&self, matcher: &M, left: L, right: R) -> DiffResult
    where
        M: SequenceMatcher + ?Sized,
        L: AsRef<[u8]>,
        R: AsRef<[u8]>,
    {
        let (left, right) = (left.as_ref(), right.as_ref());
        if left == right {
            let lines = split_lines(&decode_buffer(left));
            log::debug!("buffers are identical ({} lines)", lines.len());
            return identical(lines);
        }

        let left_lines = split_lines(&decode_buffer(left));
        let right_lines = split_lines(&decode_buffer(right));
        let left_raw = split_line_bytes(left);
        let right_raw = split_line_bytes(right);
        debug_assert_eq!(left_lines.len(), left_raw.len());
        debug_assert_eq!(right_lines.len(), right_raw.len());

        let left_keys = self.options.comparison_keys(&left_raw);
        let right_keys = self.options.comparison_keys(&right_raw);
        let left_keys: Vec<&[u8]> = left_keys.iter().map(|key| &**key).collect();
        let right_keys: Vec<&[u8]> = right_keys.iter().map(|key| &**key).collect();

        let hunks = matcher.hunks(&left_keys, &right_keys);
        log::debug!(
            "compared {} against {} lines with {}: {} hunks",
            left_lines.len(),
            right_lines.len(),
            self.options.algorithm,
            hunks.len()
        );

        reconstruct(&left_lines, &right_lines, &hunks)
    }

    /// Compare two files.
    ///
    /// A file that cannot be read is compared as an empty buffer, so a
    /// missing left file shows the whole right file as added.
    pub fn compare_files(&self, left: impl AsRef<Path>, right: impl AsRef<Path>) -> DiffResult {
        let left_bytes = read_buffer(left.as_ref());
        let right_bytes = read_buffer(right.as_ref());

        if let Some(detector) = &self.binary_detector {
            if detector.is_binary(&left_bytes) || detector.is_binary(&right_bytes) {
                log::debug!(
                    "binary input: {} vs {}",
                    left.as_ref().display(),
                    right.as_ref().display()
                );
                return DiffResult::binary(left_bytes == right_bytes);
            }
        }

        self.compare_bytes(&left_bytes, &right_bytes)
    }
}

/// Compare two in-memory buffers.
pub fn compare_buffers(left: &str, right: &str, options: &DiffOptions) -> DiffResult {
    DiffEngine::new(*options).compare_buffers(left, right)
}

/// Compare two files, reading a missing or unreadable file as empty.
pub fn compare_files(
    left: impl AsRef<Path>,
    right: impl AsRef<Path>,
    options: &DiffOptions,
) -> DiffResult {
    DiffEngine::new(*options).compare_files(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_hunk::Hunk;

    struct Broken;

    impl SequenceMatcher for Broken {
        fn hunks(&self, _left: &[&[u8]], _right: &[&[u8]]) -> Vec<Hunk> {
            vec![Hunk::new(5, 1, 5, 1)]
        }
    }

    #[test]
    #[should_panic(expected = "invalid hunk list")]
    fn broken_matcher_is_fatal() {
        DiffEngine::default().compare_with(&Broken, "a\n", "b\n");
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffEngine>();
        assert_send_sync::<DiffResult>();
    }

    #[test]
    fn bytes_that_decode_alike_still_differ() {
        let result = DiffEngine::default().compare_bytes(b"caf\xe9\nok\n", b"caf\xe8\nok\n");
        assert!(!result.identical);
        assert_eq!(result.total_diffs(), 1);
        assert_eq!(result.lines[0].text, "caf\u{fffd}");
    }

    #[test]
    fn invalid_lines_match_when_their_bytes_match() {
        let engine = DiffEngine::new(DiffOptions::default().ignore_case(true));
        let result = engine.compare_bytes(b"caf\xe9\nA\n", b"new\ncaf\xe9\na\n");
        assert_eq!(result.blocks.len(), 1);
        assert_eq!(result.blocks[0].op, crate::DiffOp::Added);
    }

    #[test]
    fn with_options_replaces_options() {
        let engine = DiffEngine::default().with_options(DiffOptions::default().ignore_case(true));
        assert!(engine.options().ignore_case);
        assert!(engine.compare_buffers("A\n", "a\n").identical);
    }
}
