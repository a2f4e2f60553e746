use crate::model::Point;

/// Maps byte offsets of a document to `Point`s (UTF-16 columns) and back.
pub struct LineMap {
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn offset_to_point(&self, text: &str, offset: usize) -> Point {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => Point {
                line: line as u32,
                col: 0,
            },
            Err(next_line_idx) => {
                let line = next_line_idx - 1;
                let line_start = self.line_starts[line];
                let col = utf16_len(&text[line_start..offset]);
                Point {
                    line: line as u32,
                    col,
                }
            }
        }
    }

    pub fn point_to_offset(&self, text: &str, point: Point) -> Option<usize> {
        let line_start = *self.line_starts.get(point.line as usize)?;
        let line_end = self
            .line_starts
            .get(point.line as usize + 1)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        col_to_byte(&text[line_start..line_end], point.col).map(|b| line_start + b)
    }

    /// Text of line `line` without its terminator
    pub fn line_text<'a>(&self, text: &'a str, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(text.len());
        Some(text[start..end].trim_end_matches('\r'))
    }
}

/// Length of `s` in UTF-16 code units
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Byte offset of UTF-16 column `col` within a single line.
///
/// Returns `None` when `col` lies past the end of the line or splits a
/// surrogate pair.
pub fn col_to_byte(line: &str, col: u32) -> Option<usize> {
    let mut current_col = 0u32;
    for (i, c) in line.char_indices() {
        if current_col == col {
            return Some(i);
        }
        if current_col > col {
            return None;
        }
        current_col += c.len_utf16() as u32;
    }

    (current_col == col).then_some(line.len())
}
