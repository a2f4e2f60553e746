//! Trigger detection.
//!
//! Decides, from the current line and cursor alone, whether a suggestion
//! session should be open and which span of the line it would replace.

use serde::{Deserialize, Serialize};

use crate::config::SuggestConfig;
use crate::line_map::{col_to_byte, utf16_len};
use crate::model::{Point, TextRange};
use crate::syntax::WikiLink;

/// The part of the cursor line a suggestion session will replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpan {
    pub line: u32,
    /// Start column (inclusive)
    pub start: u32,
    /// End column (exclusive), always the cursor column
    pub end: u32,
    pub query: String,
    /// The span is directly preceded by `[[`
    pub is_link_context: bool,
}

impl TriggerSpan {
    pub fn range(&self) -> TextRange {
        TextRange {
            start: Point {
                line: self.line,
                col: self.start,
            },
            end: Point {
                line: self.line,
                col: self.end,
            },
        }
    }
}

/// Inspect the text before `cursor` on `line_text` and decide whether to
/// open a suggestion session.
///
/// An open `[[` (no `]` between it and the cursor) wins over the plain word
/// trigger and fires even with an empty query. A plain word fires only when
/// it is at least `min_query_length` UTF-16 code units long.
pub fn detect(line_text: &str, cursor: Point, config: &SuggestConfig) -> Option<TriggerSpan> {
    let cursor_byte = col_to_byte(line_text, cursor.col)?;
    let before = &line_text[..cursor_byte];

    if let Some(query_start) = open_link_query_start(before) {
        return Some(span_from(before, query_start, cursor));
    }

    if !config.word_trigger {
        return None;
    }

    let word_start = trailing_word_start(before)?;
    if (utf16_len(&before[word_start..]) as usize) < config.min_query_length {
        return None;
    }

    Some(span_from(before, word_start, cursor))
}

/// Byte offset right after the leftmost `[[` that follows the last `]`
fn open_link_query_start(before: &str) -> Option<usize> {
    let search_from = before.rfind(']').map(|i| i + 1).unwrap_or(0);
    before[search_from..]
        .find(WikiLink::OPEN)
        .map(|i| search_from + i + WikiLink::OPEN.len())
}

/// Byte offset where the maximal trailing run of non-whitespace starts
fn trailing_word_start(before: &str) -> Option<usize> {
    before
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .last()
        .map(|(i, _)| i)
}

fn span_from(before: &str, start_byte: usize, cursor: Point) -> TriggerSpan {
    let query = &before[start_byte..];
    TriggerSpan {
        line: cursor.line,
        start: cursor.col - utf16_len(query),
        end: cursor.col,
        query: query.to_string(),
        is_link_context: before[..start_byte].ends_with(WikiLink::OPEN),
    }
}
