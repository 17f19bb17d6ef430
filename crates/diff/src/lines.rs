/// A logical line of a buffer, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Position of the line in its buffer (0-based)
    pub index: usize,

    /// The verbatim line content
    pub text: String,
}

impl Line {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Split a buffer into logical lines.
///
/// Lines end at `\n`; one trailing `\r` per line is dropped so CRLF and LF
/// files split the same way. A buffer that ends on `\n` does not produce an
/// extra empty line, and an empty buffer produces no lines at all.
pub fn split_lines(text: &str) -> Vec<Line> {
    if text.is_empty() {
        return Vec::new();
    }

    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .enumerate()
        .map(|(index, segment)| Line {
            index,
            text: segment.strip_suffix('\r').unwrap_or(segment).to_string(),
        })
        .collect()
}

/// Split raw bytes the same way [`split_lines`] splits text.
///
/// Used to compare buffers that are not valid UTF-8 by their exact bytes;
/// the `i`-th slice is the undecoded form of the `i`-th [`Line`].
pub fn split_line_bytes(buffer: &[u8]) -> Vec<&[u8]> {
    if buffer.is_empty() {
        return Vec::new();
    }

    let body = buffer.strip_suffix(b"\n").unwrap_or(buffer);
    body.split(|&b| b == b'\n')
        .map(|segment| segment.strip_suffix(b"\r").unwrap_or(segment))
        .collect()
}

/// Count the lines [`split_lines`] would produce, without allocating them.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    let breaks = text.bytes().filter(|&b| b == b'\n').count();
    if text.ends_with('\n') {
        breaks
    } else {
        breaks + 1
    }
}
