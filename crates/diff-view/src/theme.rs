//! Terminal colors for diff display

use colored::{Color, Colorize};

use crate::diff_text_view::DiffLineStyle;

/// Colors for diff display. A `None` color leaves text as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Foreground for added lines
    pub added: Option<Color>,

    /// Foreground for deleted lines
    pub deleted: Option<Color>,

    /// Line numbers, separators and folded regions
    pub muted: Option<Color>,
}

impl DiffTheme {
    /// Bright colors for dark terminals (default)
    pub fn dark() -> Self {
        Self {
            added: Some(Color::BrightGreen),
            deleted: Some(Color::BrightRed),
            muted: Some(Color::BrightBlack),
        }
    }

    /// Darker colors that stay readable on light terminals
    pub fn light() -> Self {
        Self {
            added: Some(Color::Green),
            deleted: Some(Color::Red),
            muted: Some(Color::BrightBlack),
        }
    }

    /// No escape codes at all, for pipes and files
    pub fn plain() -> Self {
        Self {
            added: None,
            deleted: None,
            muted: None,
        }
    }

    pub(crate) fn paint(&self, text: &str, style: DiffLineStyle) -> String {
        let color = match style {
            DiffLineStyle::Unchanged => None,
            DiffLineStyle::Added => self.added,
            DiffLineStyle::Deleted => self.deleted,
        };
        apply(text, color)
    }

    pub(crate) fn paint_muted(&self, text: &str) -> String {
        apply(text, self.muted)
    }
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::dark()
    }
}

fn apply(text: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => text.color(color).to_string(),
        None => text.to_string(),
    }
}
