use std::borrow::Cow;

use derive_more::Display;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Above this many lines per side, comparison keys are derived in parallel.
const PARALLEL_KEY_THRESHOLD: usize = 10_000;

/// Prefix of the key of a line that is not valid UTF-8. The byte never
/// occurs in UTF-8, so such keys cannot equal the key of a text line.
const RAW_KEY_PREFIX: u8 = 0xFF;

/// Sequence matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffAlgorithm {
    /// Minimal edit script, the default
    #[default]
    #[display(fmt = "myers")]
    Myers,

    /// Anchors on lines unique to both sides; reads better when blocks move
    #[display(fmt = "patience")]
    Patience,

    /// Frequency based variant of patience, fast on repetitive input
    #[display(fmt = "histogram")]
    Histogram,

    /// Exhaustive minimal edit script regardless of input size
    #[display(fmt = "minimal")]
    Minimal,
}

/// Comparison policy for a diff.
///
/// Options only change the key each line is compared by; the text shown for
/// a line is always its original content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffOptions {
    /// Drop every whitespace character before comparing
    pub ignore_whitespace: bool,

    /// Treat any run of whitespace as a single space, ignoring trailing whitespace
    pub ignore_whitespace_change: bool,

    /// Whitespace-only lines compare equal to each other
    pub ignore_blank_lines: bool,

    /// Compare case-insensitively
    pub ignore_case: bool,

    /// Matching algorithm
    pub algorithm: DiffAlgorithm,
}

impl DiffOptions {
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    pub fn ignore_whitespace_change(mut self, ignore: bool) -> Self {
        self.ignore_whitespace_change = ignore;
        self
    }

    pub fn ignore_blank_lines(mut self, ignore: bool) -> Self {
        self.ignore_blank_lines = ignore;
        self
    }

    pub fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    pub fn algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// True when lines are compared by their raw text
    pub fn is_exact(&self) -> bool {
        !(self.ignore_whitespace
            || self.ignore_whitespace_change
            || self.ignore_blank_lines
            || self.ignore_case)
    }

    /// Derive the key a line is compared by.
    pub fn comparison_key<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_exact() {
            return Cow::Borrowed(text);
        }

        if self.ignore_blank_lines && text.trim().is_empty() {
            return Cow::Borrowed("");
        }

        let key: Cow<'a, str> = if self.ignore_whitespace {
            if text.chars().any(char::is_whitespace) {
                Cow::Owned(text.chars().filter(|c| !c.is_whitespace()).collect())
            } else {
                Cow::Borrowed(text)
            }
        } else if self.ignore_whitespace_change {
            collapse_whitespace(text)
        } else {
            Cow::Borrowed(text)
        };

        if self.ignore_case {
            Cow::Owned(key.to_lowercase())
        } else {
            key
        }
    }

    /// Derive the key a raw line is compared by.
    ///
    /// With exact options this is the line's bytes. Otherwise valid UTF-8
    /// goes through [`comparison_key`](Self::comparison_key), and a line that
    /// is not valid UTF-8 is compared by its exact bytes.
    pub fn line_key<'a>(&self, raw: &'a [u8]) -> Cow<'a, [u8]> {
        if self.is_exact() {
            return Cow::Borrowed(raw);
        }

        match std::str::from_utf8(raw) {
            Ok(text) => match self.comparison_key(text) {
                Cow::Borrowed(key) => Cow::Borrowed(key.as_bytes()),
                Cow::Owned(key) => Cow::Owned(key.into_bytes()),
            },
            Err(_) => {
                let mut key = Vec::with_capacity(raw.len() + 1);
                key.push(RAW_KEY_PREFIX);
                key.extend_from_slice(raw);
                Cow::Owned(key)
            }
        }
    }

    /// Derive the keys for a whole side, preserving order.
    pub fn comparison_keys<'a>(&self, lines: &[&'a [u8]]) -> Vec<Cow<'a, [u8]>> {
        if lines.len() >= PARALLEL_KEY_THRESHOLD && !self.is_exact() {
            lines.par_iter().map(|&line| self.line_key(line)).collect()
        } else {
            lines.iter().map(|&line| self.line_key(line)).collect()
        }
    }
}

fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim_end();
    let already_collapsed = trimmed.len() == text.len() && {
        let mut previous_space = false;
        trimmed.chars().all(|c| {
            let ok = !(c.is_whitespace() && (c != ' ' || previous_space));
            previous_space = c.is_whitespace();
            ok
        })
    };
    if already_collapsed {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut in_space = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    Cow::Owned(out)
}
