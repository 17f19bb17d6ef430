// Core diff library: splits buffers into lines, matches them under a
// comparison policy and expands the matcher's hunks into a row-per-line
// model for side-by-side viewers.

mod buffer_diff;
mod diff_hunk;
mod engine;
mod file_ops;
mod lines;
mod matcher;
mod options;
mod reconstruct;

pub use buffer_diff::{DiffResult, DiffStats};
pub use diff_hunk::{DiffBlock, DiffLine, DiffOp, Hunk, LineRange};
pub use engine::{compare_buffers, compare_files, DiffEngine};
pub use file_ops::{decode_buffer, read_buffer, try_read_buffer, BinaryDetector};
pub use lines::{line_count, split_line_bytes, split_lines, Line};
pub use matcher::SequenceMatcher;
pub use options::{DiffAlgorithm, DiffOptions};
pub use reconstruct::{reconstruct, validate_hunks};
