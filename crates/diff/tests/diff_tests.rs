use line_diff::{compare_buffers, DiffBlock, DiffOp, DiffOptions};
use pretty_assertions::assert_eq;

fn rows(left: &str, right: &str) -> Vec<(DiffOp, String)> {
    compare_buffers(left, right, &DiffOptions::default())
        .lines
        .into_iter()
        .map(|line| (line.op, line.text))
        .collect()
}

fn row(op: DiffOp, text: &str) -> (DiffOp, String) {
    (op, text.to_string())
}

#[test]
fn test_modified_line() {
    let result = compare_buffers("a\nb\nc\n", "a\nx\nc\n", &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Modified, 1, 1, 1, 1)]);
    assert_eq!(
        rows("a\nb\nc\n", "a\nx\nc\n"),
        vec![
            row(DiffOp::Equal, "a"),
            row(DiffOp::Removed, "b"),
            row(DiffOp::Added, "x"),
            row(DiffOp::Equal, "c"),
        ]
    );
    assert!(!result.identical);
    assert_eq!(result.total_diffs(), 1);
}

#[test]
fn test_added_line() {
    let result = compare_buffers("a\nb\n", "a\nb\nc\n", &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Added, 2, 0, 2, 1)]);
    assert_eq!(
        rows("a\nb\n", "a\nb\nc\n"),
        vec![
            row(DiffOp::Equal, "a"),
            row(DiffOp::Equal, "b"),
            row(DiffOp::Added, "c"),
        ]
    );
}

#[test]
fn test_removed_line() {
    let result = compare_buffers("a\nb\nc\n", "a\nc\n", &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Removed, 1, 1, 1, 0)]);
    assert_eq!(
        rows("a\nb\nc\n", "a\nc\n"),
        vec![
            row(DiffOp::Equal, "a"),
            row(DiffOp::Removed, "b"),
            row(DiffOp::Equal, "c"),
        ]
    );
}

#[test]
fn test_empty_files() {
    let result = compare_buffers("", "", &DiffOptions::default());

    assert!(result.identical);
    assert!(result.lines.is_empty());
    assert!(result.blocks.is_empty());
    assert!(!result.binary_file);
}

#[test]
fn test_identical_files() {
    let text = "Line 1\nLine 2\nLine 3\n";
    let result = compare_buffers(text, text, &DiffOptions::default());

    assert!(result.identical);
    assert!(result.blocks.is_empty());
    assert_eq!(result.lines.len(), 3);
    for (index, line) in result.lines.iter().enumerate() {
        assert_eq!(line.op, DiffOp::Equal);
        assert_eq!(line.left_line_num, Some(index));
        assert_eq!(line.right_line_num, Some(index));
    }
    assert_eq!(result.summary(), "Files are identical");
}

#[test]
fn test_added_file() {
    let result = compare_buffers("", "Line 1\nLine 2\n", &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Added, 0, 0, 0, 2)]);
    assert!(result.lines.iter().all(|line| line.op == DiffOp::Added));
    assert!(result.lines.iter().all(|line| line.left_line_num.is_none()));
}

#[test]
fn test_deleted_file() {
    let result = compare_buffers("Line 1\nLine 2\n", "", &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Removed, 0, 2, 0, 0)]);
    assert!(result.lines.iter().all(|line| line.op == DiffOp::Removed));
    assert!(result.lines.iter().all(|line| line.right_line_num.is_none()));
}

#[test]
fn test_multi_block_diff() {
    let old = "Line 1\nLine 2\nLine 3\nLine 4\nLine 5\nLine 6\nLine 7\nLine 8\n";
    let new = "Line 1\nLine 2 modified\nLine 3\nLine 4\nLine 5\nLine 6 modified\nLine 7\nLine 8\n";

    let result = compare_buffers(old, new, &DiffOptions::default());

    assert_eq!(
        result.blocks,
        vec![
            DiffBlock::new(DiffOp::Modified, 1, 1, 1, 1),
            DiffBlock::new(DiffOp::Modified, 5, 1, 5, 1),
        ]
    );
    assert_eq!(result.total_diffs(), 2);
    assert_eq!(result.summary(), "2 differences");

    let stats = result.stats();
    assert_eq!(stats.blocks, 2);
    assert_eq!(stats.added_lines, 2);
    assert_eq!(stats.removed_lines, 2);
    assert_eq!(stats.unchanged_lines, 6);
}

#[test]
fn test_total_diffs_counts_regions() {
    let old: String = (0..50).map(|i| format!("old {i}\n")).collect();
    let new: String = (0..50).map(|i| format!("new {i}\n")).collect();
    let result = compare_buffers(&old, &new, &DiffOptions::default());

    assert_eq!(result.blocks, vec![DiffBlock::new(DiffOp::Modified, 0, 50, 0, 50)]);
    assert_eq!(result.total_diffs(), 1);
    assert_eq!(result.stats().added_lines, 50);
    assert_eq!(result.summary(), "1 difference");
}

#[test]
fn test_line_numbers() {
    let result = compare_buffers("a\nb\nc\n", "a\nx\ny\nc\n", &DiffOptions::default());
    let numbers: Vec<_> = result
        .lines
        .iter()
        .map(|line| (line.op, line.left_line_num, line.right_line_num))
        .collect();

    assert_eq!(
        numbers,
        vec![
            (DiffOp::Equal, Some(0), Some(0)),
            (DiffOp::Removed, Some(1), None),
            (DiffOp::Added, None, Some(1)),
            (DiffOp::Added, None, Some(2)),
            (DiffOp::Equal, Some(2), Some(3)),
        ]
    );
}

#[test]
fn test_navigation_rows() {
    let result = compare_buffers(
        "a\nb\nc\nd\ne\n",
        "a\nB\nc\nd\ne\nf\n",
        &DiffOptions::default(),
    );

    assert_eq!(result.blocks.len(), 2);
    let first = result.next_block(None).unwrap();
    assert_eq!(first, 0);
    assert_eq!(result.row_of_block(first), Some(1));
    assert_eq!(result.block_at_row(2), Some(0));

    let second = result.next_block(Some(first)).unwrap();
    assert_eq!(result.blocks[second].op, DiffOp::Added);
    assert_eq!(result.row_of_block(second), Some(6));
    assert_eq!(result.block_at_row(6), Some(1));
    assert_eq!(result.block_at_row(0), None);

    assert_eq!(result.next_block(Some(second)), None);
    assert_eq!(result.prev_block(Some(second)), Some(first));
}
