use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diff_hunk::{DiffBlock, DiffLine, DiffOp};

/// The complete result of comparing two buffers.
///
/// A result owns copies of every line it shows, so it outlives the buffers
/// it was computed from and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffResult {
    /// Every row of the diff, in display order
    pub lines: Vec<DiffLine>,

    /// The change regions, sorted by `left_start`
    pub blocks: Vec<DiffBlock>,

    /// True when the comparison found no change regions
    pub identical: bool,

    /// Set when a binary detector classified the input; no rows are produced
    pub binary_file: bool,
}

/// Line-level counts for a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display(
    fmt = "{} added, {} removed, {} unchanged",
    added_lines,
    removed_lines,
    unchanged_lines
)]
pub struct DiffStats {
    /// Number of change regions
    pub blocks: usize,

    /// Rows that only exist on the right
    pub added_lines: usize,

    /// Rows that only exist on the left
    pub removed_lines: usize,

    /// Rows shared by both sides
    pub unchanged_lines: usize,
}

impl DiffResult {
    pub(crate) fn from_parts(lines: Vec<DiffLine>, blocks: Vec<DiffBlock>) -> Self {
        let identical = blocks.is_empty();
        Self {
            lines,
            blocks,
            identical,
            binary_file: false,
        }
    }

    /// A result for input a binary detector refused to compare line by line
    pub fn binary(identical: bool) -> Self {
        Self {
            lines: Vec::new(),
            blocks: Vec::new(),
            identical,
            binary_file: true,
        }
    }

    /// The number of change regions. A modified block spanning many lines
    /// still counts once.
    pub fn total_diffs(&self) -> usize {
        self.blocks.iter().filter(|b| b.op != DiffOp::Equal).count()
    }

    /// Count rows by kind
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats {
            blocks: self.total_diffs(),
            ..DiffStats::default()
        };
        for line in &self.lines {
            match line.op {
                DiffOp::Equal => stats.unchanged_lines += 1,
                DiffOp::Added => stats.added_lines += 1,
                DiffOp::Removed => stats.removed_lines += 1,
                DiffOp::Modified => {
                    stats.removed_lines += 1;
                    stats.added_lines += 1;
                }
            }
        }
        stats
    }

    /// Short status text for a viewer
    pub fn summary(&self) -> String {
        if self.binary_file {
            return if self.identical {
                "Binary files are identical".to_string()
            } else {
                "Binary files differ".to_string()
            };
        }
        match self.total_diffs() {
            0 => "Files are identical".to_string(),
            1 => "1 difference".to_string(),
            n => format!("{n} differences"),
        }
    }

    /// Get a block by index
    pub fn block(&self, index: usize) -> Option<&DiffBlock> {
        self.blocks.get(index)
    }

    /// The block after `current`: the one with the smallest `left_start`
    /// strictly greater than the current block's. With no current block,
    /// the first block.
    pub fn next_block(&self, current: Option<usize>) -> Option<usize> {
        let Some(current) = current else {
            return self.first_change();
        };
        let from = self.blocks.get(current)?.left_start;
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.has_changes() && block.left_start > from)
            .min_by_key(|(_, block)| block.left_start)
            .map(|(index, _)| index)
    }

    /// The block before `current`: the one with the largest `left_start`
    /// strictly less than the current block's. With no current block, the
    /// last block.
    pub fn prev_block(&self, current: Option<usize>) -> Option<usize> {
        let Some(current) = current else {
            return self.blocks.iter().rposition(DiffBlock::has_changes);
        };
        let from = self.blocks.get(current)?.left_start;
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.has_changes() && block.left_start < from)
            .max_by_key(|(_, block)| block.left_start)
            .map(|(index, _)| index)
    }

    fn first_change(&self) -> Option<usize> {
        self.blocks.iter().position(DiffBlock::has_changes)
    }

    /// The row where a block's first line is shown
    pub fn row_of_block(&self, index: usize) -> Option<usize> {
        let block = self.blocks.get(index)?;
        // Rows are ordered on both sides, so "at or after the block" is a
        // monotone predicate over `lines`.
        let row = self.lines.partition_point(|line| {
            !(line.left_line_num.is_some_and(|n| n >= block.left_start)
                || line.right_line_num.is_some_and(|n| n >= block.right_start))
        });
        let line = self.lines.get(row)?;
        let starts_block = if block.left_count > 0 {
            line.op == DiffOp::Removed && line.left_line_num == Some(block.left_start)
        } else {
            line.op == DiffOp::Added && line.right_line_num == Some(block.right_start)
        };
        starts_block.then_some(row)
    }

    /// The block a row belongs to, if the row is part of a change
    pub fn block_at_row(&self, row: usize) -> Option<usize> {
        let line = self.lines.get(row)?;
        let index = match (line.op, line.left_line_num, line.right_line_num) {
            (DiffOp::Equal, _, _) => return None,
            (_, Some(n), _) => self.blocks.partition_point(|block| block.left_range().end() <= n),
            (_, None, Some(n)) => self.blocks.partition_point(|block| block.right_range().end() <= n),
            (_, None, None) => return None,
        };
        let block = self.blocks.get(index)?;
        let owns_row = line.left_line_num.is_some_and(|n| block.left_range().contains(n))
            || line.right_line_num.is_some_and(|n| block.right_range().contains(n));
        owns_row.then_some(index)
    }
}
