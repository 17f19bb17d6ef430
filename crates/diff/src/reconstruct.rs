use anyhow::{ensure, Result};

use crate::buffer_diff::DiffResult;
use crate::diff_hunk::{DiffBlock, DiffLine, DiffOp, Hunk};
use crate::lines::Line;

/// Check that a hunk list is something [`reconstruct`] can expand.
///
/// Hunks must be non-empty, lie inside both sequences, be sorted and
/// non-overlapping on both sides, and leave equal-sized gaps on the left and
/// right between each other and at both ends.
pub fn validate_hunks(hunks: &[Hunk], left_len: usize, right_len: usize) -> Result<()> {
    let mut left_pos = 0;
    let mut right_pos = 0;

    for (i, hunk) in hunks.iter().enumerate() {
        ensure!(
            hunk.left_count > 0 || hunk.right_count > 0,
            "hunk {i} is empty: {hunk:?}"
        );
        ensure!(
            hunk.left_start >= left_pos && hunk.right_start >= right_pos,
            "hunk {i} overlaps or precedes the previous hunk: {hunk:?}"
        );
        ensure!(
            hunk.left_end() <= left_len && hunk.right_end() <= right_len,
            "hunk {i} runs past the end of the input ({left_len} left, {right_len} right lines): {hunk:?}"
        );

        let left_gap = hunk.left_start - left_pos;
        let right_gap = hunk.right_start - right_pos;
        ensure!(
            left_gap == right_gap,
            "gap before hunk {i} differs between sides ({left_gap} left, {right_gap} right): {hunk:?}"
        );

        left_pos = hunk.left_end();
        right_pos = hunk.right_end();
    }

    ensure!(
        left_len - left_pos == right_len - right_pos,
        "hunks do not cover the input: {} left and {} right lines remain after the last hunk",
        left_len - left_pos,
        right_len - right_pos
    );
    Ok(())
}

/// Expand a hunk list into a complete, line-by-line diff.
///
/// # Panics
///
/// Panics when `hunks` fails [`validate_hunks`]; a malformed hunk list is a
/// bug in the matcher that produced it.
pub fn reconstruct(left: &[Line], right: &[Line], hunks: &[Hunk]) -> DiffResult {
    if let Err(err) = validate_hunks(hunks, left.len(), right.len()) {
        panic!("sequence matcher returned an invalid hunk list: {err:#}");
    }

    let mut lines = Vec::with_capacity(left.len().max(right.len()));
    let mut blocks = Vec::with_capacity(hunks.len());
    let mut left_pos = 0;
    let mut right_pos = 0;

    for hunk in hunks {
        while left_pos < hunk.left_start && right_pos < hunk.right_start {
            lines.push(DiffLine::matched(
                &left[left_pos].text,
                &right[right_pos].text,
                left_pos,
                right_pos,
            ));
            left_pos += 1;
            right_pos += 1;
        }
        assert_eq!(
            (left_pos, right_pos),
            (hunk.left_start, hunk.right_start),
            "unequal gap before {hunk:?}"
        );

        let block = DiffBlock::from(*hunk);
        log::trace!(
            "{} block: left {}+{} right {}+{}",
            block.op,
            block.left_start,
            block.left_count,
            block.right_start,
            block.right_count
        );

        // Modified blocks list every removed line before any added line.
        if block.op != DiffOp::Added {
            lines.extend(
                left[hunk.left_start..hunk.left_end()]
                    .iter()
                    .map(|line| DiffLine::removed(&line.text, line.index)),
            );
        }
        if block.op != DiffOp::Removed {
            lines.extend(
                right[hunk.right_start..hunk.right_end()]
                    .iter()
                    .map(|line| DiffLine::added(&line.text, line.index)),
            );
        }
        blocks.push(block);

        left_pos = hunk.left_end();
        right_pos = hunk.right_end();
    }

    while left_pos < left.len() && right_pos < right.len() {
        lines.push(DiffLine::matched(
            &left[left_pos].text,
            &right[right_pos].text,
            left_pos,
            right_pos,
        ));
        left_pos += 1;
        right_pos += 1;
    }
    assert!(
        left_pos == left.len() && right_pos == right.len(),
        "hunks left lines unaccounted for: left {left_pos}/{}, right {right_pos}/{}",
        left.len(),
        right.len()
    );

    DiffResult::from_parts(lines, blocks)
}

/// The all-equal diff of a buffer against itself.
pub(crate) fn identical(lines: Vec<Line>) -> DiffResult {
    let lines = lines
        .into_iter()
        .map(|line| DiffLine::equal(line.text, line.index, line.index))
        .collect();
    DiffResult::from_parts(lines, Vec::new())
}
