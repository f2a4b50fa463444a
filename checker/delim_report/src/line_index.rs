//! Line/column resolution for byte offsets.
//!
//! Pre-computes a table of line-start offsets for O(log L) lookup instead
//! of O(n) scanning; the emitters resolve several offsets per diagnostic
//! (labels, snippet bounds), so repeated linear scans would add up on big
//! files.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use delim_report::LineIndex;
///
/// let source = "line1\nline2\nline3";
/// let index = LineIndex::build(source);
///
/// assert_eq!(index.line_col(source, 0), (1, 1));
/// assert_eq!(index.line_col(source, 6), (2, 1));
/// assert_eq!(index.line_col(source, 12), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start.
    /// `offsets[0] = 0` (line 1 starts at byte 0); each subsequent entry is
    /// the byte after a `\n`.
    offsets: Vec<u32>,
}

impl LineIndex {
    /// Build a line offset table from source text.
    ///
    /// O(n) construction for O(log L) lookups, where L is the line count.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { offsets }
    }

    /// Get the 1-based line number containing a byte offset.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) for a byte offset.
    ///
    /// The column counts characters (not bytes) from the line start, so a
    /// caret under a delimiter lines up even after multi-byte content.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.line_start(line);
        let end = (offset as usize).min(source.len());
        let chars = source
            .get(start as usize..end)
            .map_or(end - start as usize, |s| s.chars().count());
        (line, u32::try_from(chars).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where the given 1-based line starts.
    pub fn line_start(&self, line: u32) -> u32 {
        let idx = line.saturating_sub(1) as usize;
        self.offsets.get(idx).copied().unwrap_or(0)
    }

    /// The source text of the given 1-based line, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> &'a str {
        let start = self.line_start(line) as usize;
        let rest = source.get(start..).unwrap_or("");
        rest.split_terminator('\n').next().unwrap_or("").trim_end_matches('\r')
    }

    /// Total number of lines (at least 1, even for empty sources).
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests;
