//! Diff Text View - lays a `DiffResult` out as terminal rows
//!
//! Rows are computed once from the result; rendering turns them into
//! side-by-side columns or a single inline column, optionally folding
//! unchanged runs away from the changes.

use line_diff::{DiffLine, DiffOp, DiffResult};

pub use crate::theme::DiffTheme;

const TAB_WIDTH: usize = 4;

/// Layout of the rendered diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Left and right text next to each other, changes paired up
    #[default]
    SideBySide,
    /// One column, removed lines before added lines
    Inline,
}

/// Style for a single display cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineStyle {
    /// Line exists in both versions (no change)
    Unchanged,
    /// Line was added (only in new version)
    Added,
    /// Line was deleted (only in old version)
    Deleted,
}

impl DiffLineStyle {
    fn marker(self) -> char {
        match self {
            DiffLineStyle::Unchanged => ' ',
            DiffLineStyle::Added => '+',
            DiffLineStyle::Deleted => '-',
        }
    }
}

/// One side of a display row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCell {
    /// 0-based line number on this side
    pub line_num: usize,
    /// The line text
    pub content: String,
    /// How to style this cell
    pub style: DiffLineStyle,
}

impl DiffCell {
    fn new(line_num: usize, content: &str, style: DiffLineStyle) -> Self {
        Self {
            line_num,
            content: content.to_string(),
            style,
        }
    }
}

/// A side-by-side row; either side may be empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub left: Option<DiffCell>,
    pub right: Option<DiffCell>,
    /// Index of the block this row belongs to, if it is part of a change
    pub block: Option<usize>,
}

impl DisplayRow {
    fn is_change(&self) -> bool {
        self.block.is_some()
    }
}

/// The diff view: a `DiffResult` plus presentation settings
pub struct DiffTextView {
    result: DiffResult,
    rows: Vec<DisplayRow>,
    theme: DiffTheme,
    mode: ViewMode,
    width: usize,
    context: Option<usize>,
}

impl DiffTextView {
    /// Create a view over a finished comparison
    pub fn new(result: DiffResult) -> Self {
        let rows = compute_display_rows(&result);
        Self {
            result,
            rows,
            theme: DiffTheme::default(),
            mode: ViewMode::default(),
            width: 120,
            context: None,
        }
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: DiffTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the layout
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Total width for side-by-side output
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Fold unchanged rows farther than `context` rows from any change
    pub fn with_context(mut self, context: Option<usize>) -> Self {
        self.context = context;
        self
    }

    pub fn result(&self) -> &DiffResult {
        &self.result
    }

    pub fn into_result(self) -> DiffResult {
        self.result
    }

    /// Render every row
    pub fn render(&self) -> String {
        let visible: Vec<bool> = match self.context {
            Some(context) => visible_rows(&self.rows, context, |row| row.is_change()),
            None => vec![true; self.rows.len()],
        };
        self.render_rows(&visible, 0)
    }

    /// Render one block and its surrounding context
    pub fn render_block(&self, block: usize) -> Option<String> {
        self.result.block(block)?;
        let context = self.context.unwrap_or(3);
        let visible = visible_rows(&self.rows, context, |row| row.block == Some(block));
        let first = visible.iter().position(|&v| v)?;
        let last = visible.iter().rposition(|&v| v)?;
        Some(self.render_rows(&visible[first..=last], first))
    }

    /// Render `visible.len()` rows starting at `offset`, folding hidden ones
    fn render_rows(&self, visible: &[bool], offset: usize) -> String {
        let number_width = self.number_width();
        let mut out = String::new();
        let mut hidden = 0;

        for (row, &shown) in self.rows[offset..].iter().zip(visible) {
            if !shown {
                hidden += 1;
                continue;
            }
            if hidden > 0 {
                out.push_str(&self.fold_line(hidden));
                hidden = 0;
            }
            match self.mode {
                ViewMode::SideBySide => out.push_str(&self.side_by_side_line(row, number_width)),
                ViewMode::Inline => out.push_str(&self.inline_lines(row, number_width)),
            }
        }
        if hidden > 0 {
            out.push_str(&self.fold_line(hidden));
        }
        out
    }

    fn number_width(&self) -> usize {
        let max = self
            .rows
            .iter()
            .flat_map(|row| [row.left.as_ref(), row.right.as_ref()])
            .flatten()
            .map(|cell| cell.line_num + 1)
            .max()
            .unwrap_or(0);
        max.to_string().len()
    }

    fn fold_line(&self, hidden: usize) -> String {
        let text = if hidden == 1 {
            "⋯ 1 unchanged line".to_string()
        } else {
            format!("⋯ {hidden} unchanged lines")
        };
        format!("{}\n", self.theme.paint_muted(&text))
    }

    fn side_by_side_line(&self, row: &DisplayRow, number_width: usize) -> String {
        // "NN m text" on each side plus " │ " between them.
        let gutter = number_width + 3;
        let column = (self.width.saturating_sub(3) / 2).saturating_sub(gutter).max(1);

        let left = self.cell(row.left.as_ref(), number_width, Some(column));
        let right = self.cell(row.right.as_ref(), number_width, None);
        let line = format!("{left}{}{right}", self.theme.paint_muted(" │ "));
        format!("{}\n", line.trim_end())
    }

    fn inline_lines(&self, row: &DisplayRow, number_width: usize) -> String {
        let mut out = String::new();
        let cells: Vec<(Option<usize>, Option<usize>, &DiffCell)> = match (&row.left, &row.right) {
            (Some(left), Some(right)) if left.style == DiffLineStyle::Unchanged => {
                vec![(Some(left.line_num), Some(right.line_num), left)]
            }
            (left, right) => left
                .iter()
                .map(|cell| (Some(cell.line_num), None, cell))
                .chain(right.iter().map(|cell| (None, Some(cell.line_num), cell)))
                .collect(),
        };
        for (left_num, right_num, cell) in cells {
            let numbers = format!(
                "{} {}",
                format_number(left_num, number_width),
                format_number(right_num, number_width)
            );
            let text = format!("{} {}", cell.style.marker(), expand_tabs(&cell.content));
            let line = format!(
                "{} {}",
                self.theme.paint_muted(&numbers),
                self.theme.paint(&text, cell.style)
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn cell(&self, cell: Option<&DiffCell>, number_width: usize, column: Option<usize>) -> String {
        let (number, marker, text, style) = match cell {
            Some(cell) => (
                Some(cell.line_num),
                cell.style.marker(),
                expand_tabs(&cell.content),
                cell.style,
            ),
            None => (None, ' ', String::new(), DiffLineStyle::Unchanged),
        };
        let text = match column {
            Some(column) => fit(&text, column),
            None => text,
        };
        format!(
            "{} {}",
            self.theme.paint_muted(&format_number(number, number_width)),
            self.theme.paint(&format!("{marker} {text}"), style)
        )
    }
}

/// Pair the rows of a result for side-by-side display.
///
/// Unchanged rows fill both columns, each side with its own text. Inside a
/// change the i-th removed line sits next to the i-th added line; whichever
/// side runs out first is left empty.
pub fn compute_display_rows(result: &DiffResult) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(result.lines.len());
    let mut removed: Vec<&DiffLine> = Vec::new();
    let mut added: Vec<&DiffLine> = Vec::new();

    // Changed rows come block by block, each block contributing exactly
    // `left_count + right_count` rows.
    let mut blocks = result.blocks.iter().enumerate();
    let mut current: Option<usize> = None;
    let mut remaining = 0;

    for line in &result.lines {
        if line.op == DiffOp::Equal {
            flush_change(&mut rows, &mut removed, &mut added, current);
            if let (Some(left), Some(right)) = (line.left_line_num, line.right_line_num) {
                let right_text = line.right_side().unwrap_or(&line.text);
                rows.push(DisplayRow {
                    left: Some(DiffCell::new(left, &line.text, DiffLineStyle::Unchanged)),
                    right: Some(DiffCell::new(right, right_text, DiffLineStyle::Unchanged)),
                    block: None,
                });
            }
            continue;
        }

        if remaining == 0 {
            flush_change(&mut rows, &mut removed, &mut added, current);
            match blocks.next() {
                Some((index, block)) => {
                    current = Some(index);
                    remaining = block.left_count + block.right_count;
                }
                None => current = None,
            }
        }
        remaining = remaining.saturating_sub(1);

        if line.left_line_num.is_some() {
            removed.push(line);
        }
        if line.right_line_num.is_some() {
            added.push(line);
        }
    }
    flush_change(&mut rows, &mut removed, &mut added, current);
    rows
}

fn flush_change(
    rows: &mut Vec<DisplayRow>,
    removed: &mut Vec<&DiffLine>,
    added: &mut Vec<&DiffLine>,
    block: Option<usize>,
) {
    let height = removed.len().max(added.len());
    for i in 0..height {
        let left = removed.get(i).and_then(|line| {
            let text = line.left_side()?;
            line.left_line_num
                .map(|n| DiffCell::new(n, text, DiffLineStyle::Deleted))
        });
        let right = added.get(i).and_then(|line| {
            let text = line.right_side()?;
            line.right_line_num
                .map(|n| DiffCell::new(n, text, DiffLineStyle::Added))
        });
        rows.push(DisplayRow { left, right, block });
    }
    removed.clear();
    added.clear();
}

/// Mark rows within `context` rows of a row matching `is_target`
fn visible_rows<F>(rows: &[DisplayRow], context: usize, is_target: F) -> Vec<bool>
where
    F: Fn(&DisplayRow) -> bool,
{
    // Distance to the nearest target before each row, then after it.
    let mut distance = vec![usize::MAX; rows.len()];
    let mut last: Option<usize> = None;
    for (index, row) in rows.iter().enumerate() {
        if is_target(row) {
            last = Some(index);
        }
        if let Some(target) = last {
            distance[index] = index - target;
        }
    }
    let mut next: Option<usize> = None;
    for index in (0..rows.len()).rev() {
        if distance[index] == 0 {
            next = Some(index);
        }
        if let Some(target) = next {
            distance[index] = distance[index].min(target - index);
        }
    }
    distance.into_iter().map(|d| d <= context).collect()
}

fn format_number(number: Option<usize>, width: usize) -> String {
    match number {
        Some(n) => format!("{:>width$}", n + 1),
        None => " ".repeat(width),
    }
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Truncate or pad to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}
