use derive_more::Display;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a row or block in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffOp {
    /// Same content on both sides
    #[display(fmt = "Equal")]
    Equal,

    /// Content that only exists on the right side
    #[display(fmt = "Added")]
    Added,

    /// Content that only exists on the left side
    #[display(fmt = "Removed")]
    Removed,

    /// A region replaced on both sides
    #[display(fmt = "Modified")]
    Modified,
}

/// The lines a block covers on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRange {
    pub start: usize,
    pub count: usize,
}

impl LineRange {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// One past the last line
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..self.end()).contains(&line)
    }
}

/// A changed region as reported by a sequence matcher.
///
/// Everything a matcher does not report is equal on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hunk {
    pub left_start: usize,
    pub left_count: usize,
    pub right_start: usize,
    pub right_count: usize,
}

impl Hunk {
    pub fn new(left_start: usize, left_count: usize, right_start: usize, right_count: usize) -> Self {
        Self {
            left_start,
            left_count,
            right_start,
            right_count,
        }
    }

    /// Build a hunk from the half-open line ranges on each side
    pub fn from_ranges(left: Range<usize>, right: Range<usize>) -> Self {
        Self::new(left.start, left.len(), right.start, right.len())
    }

    pub fn left_end(&self) -> usize {
        self.left_start + self.left_count
    }

    pub fn right_end(&self) -> usize {
        self.right_start + self.right_count
    }

    /// Classify the hunk by which sides it touches
    pub fn op(&self) -> DiffOp {
        if self.left_count == 0 {
            DiffOp::Added
        } else if self.right_count == 0 {
            DiffOp::Removed
        } else {
            DiffOp::Modified
        }
    }
}

/// A contiguous change region in a [`DiffResult`](crate::DiffResult)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffBlock {
    /// The classification of the block
    pub op: DiffOp,

    /// First line of the block on the left side
    pub left_start: usize,

    /// Number of left lines in the block
    pub left_count: usize,

    /// First line of the block on the right side
    pub right_start: usize,

    /// Number of right lines in the block
    pub right_count: usize,
}

impl DiffBlock {
    /// Create a new diff block
    pub fn new(
        op: DiffOp,
        left_start: usize,
        left_count: usize,
        right_start: usize,
        right_count: usize,
    ) -> Self {
        Self {
            op,
            left_start,
            left_count,
            right_start,
            right_count,
        }
    }

    /// The lines this block covers on the left side
    pub fn left_range(&self) -> LineRange {
        LineRange::new(self.left_start, self.left_count)
    }

    /// The lines this block covers on the right side
    pub fn right_range(&self) -> LineRange {
        LineRange::new(self.right_start, self.right_count)
    }

    /// Check if this block is a change region
    pub fn has_changes(&self) -> bool {
        self.op != DiffOp::Equal
    }
}

impl From<Hunk> for DiffBlock {
    fn from(hunk: Hunk) -> Self {
        Self::new(
            hunk.op(),
            hunk.left_start,
            hunk.left_count,
            hunk.right_start,
            hunk.right_count,
        )
    }
}

/// One row of the annotated, line-by-line output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffLine {
    /// The verbatim line text, without its terminator
    pub text: String,

    /// Whether the row is shared, added or removed
    pub op: DiffOp,

    /// Index of the line on the left side, if it has one
    pub left_line_num: Option<usize>,

    /// Index of the line on the right side, if it has one
    pub right_line_num: Option<usize>,

    /// Right side text of an `Equal` row whose lines differ only in content
    /// the comparison ignored; `text` holds the left side
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub right_text: Option<String>,
}

impl DiffLine {
    pub fn equal(text: impl Into<String>, left_line_num: usize, right_line_num: usize) -> Self {
        Self {
            text: text.into(),
            op: DiffOp::Equal,
            left_line_num: Some(left_line_num),
            right_line_num: Some(right_line_num),
            right_text: None,
        }
    }

    /// An `Equal` row pairing two lines that may differ in ignored content
    pub fn matched(left: &str, right: &str, left_line_num: usize, right_line_num: usize) -> Self {
        let mut line = Self::equal(left, left_line_num, right_line_num);
        if left != right {
            line.right_text = Some(right.to_string());
        }
        line
    }

    pub fn removed(text: impl Into<String>, left_line_num: usize) -> Self {
        Self {
            text: text.into(),
            op: DiffOp::Removed,
            left_line_num: Some(left_line_num),
            right_line_num: None,
            right_text: None,
        }
    }

    pub fn added(text: impl Into<String>, right_line_num: usize) -> Self {
        Self {
            text: text.into(),
            op: DiffOp::Added,
            left_line_num: None,
            right_line_num: Some(right_line_num),
            right_text: None,
        }
    }

    /// The text of the left line this row shows, if any
    pub fn left_side(&self) -> Option<&str> {
        self.left_line_num.map(|_| self.text.as_str())
    }

    /// The text of the right line this row shows, if any
    pub fn right_side(&self) -> Option<&str> {
        self.right_line_num
            .map(|_| self.right_text.as_deref().unwrap_or(&self.text))
    }
}
