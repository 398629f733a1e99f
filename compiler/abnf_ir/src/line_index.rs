//! Offset to line/column conversion.

use std::fmt;

/// A 1-based line and column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Pre-computed line start offsets for a source buffer.
///
/// `line_starts[0]` is always 0; `line_starts[n]` is the offset of line n+1.
/// Offsets are in whatever unit the index was built with: bytes for
/// [`LineIndex::new`], characters for [`LineIndex::from_chars`].
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Index a UTF-8 string by byte offset.
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| saturate(i + 1)),
            )
            .collect();
        LineIndex {
            line_starts,
            len: saturate(source.len()),
        }
    }

    /// Index a character buffer by character offset.
    pub fn from_chars(source: &[char]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == '\n')
                    .map(|(i, _)| saturate(i + 1)),
            )
            .collect();
        LineIndex {
            line_starts,
            len: saturate(source.len()),
        }
    }

    /// Convert an offset to a 1-based line/column pair.
    ///
    /// Offsets past the end clamp to the end of the buffer.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        LineCol {
            line: saturate(line_idx + 1),
            col: offset - start + 1,
        }
    }

    /// Offset at which the given 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.line_starts.get(idx).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
