//! Insertion of the chosen candidate.

use crate::line_map::col_to_byte;
use crate::model::TextEdit;
use crate::rank::Candidate;
use crate::syntax::WikiLink;
use crate::trigger::TriggerSpan;

/// Text that replaces the trigger span.
///
/// Inside `[[` only the target and the closing token are written; the
/// opening token the user typed stays as it is.
pub fn replacement(link_text: &str, is_link_context: bool) -> String {
    if is_link_context {
        WikiLink::close(link_text)
    } else {
        WikiLink::wrap(link_text)
    }
}

/// Edit that inserts `candidate` over `span`.
///
/// `None` when the session lost its span; the selection is then dropped.
pub fn rewrite(candidate: &Candidate, span: Option<&TriggerSpan>) -> Option<TextEdit> {
    let span = span?;
    Some(TextEdit {
        range: span.range(),
        new_text: replacement(&candidate.link_text, span.is_link_context),
    })
}

/// Apply a single-line edit to `line`.
///
/// `None` when the edit spans lines or its columns fall outside `line`.
pub fn apply(line: &str, edit: &TextEdit) -> Option<String> {
    if edit.range.start.line != edit.range.end.line {
        return None;
    }
    let start = col_to_byte(line, edit.range.start.col)?;
    let end = col_to_byte(line, edit.range.end.col)?;
    if start > end {
        return None;
    }

    let mut out = String::with_capacity(line.len() + edit.new_text.len());
    out.push_str(&line[..start]);
    out.push_str(&edit.new_text);
    out.push_str(&line[end..]);
    Some(out)
}
