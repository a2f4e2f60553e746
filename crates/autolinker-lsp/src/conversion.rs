//! Conversion utilities between Core types and LSP types

use autolinker_core::model::{Point, TextEdit as CoreTextEdit, TextRange};
use autolinker_core::{Candidate, CandidateKind, SuggestSession};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionList, CompletionTextEdit, Position, Range,
    TextEdit,
};

/// Convert LSP Position to Core Point
/// Both use 0-based lines and UTF-16 columns
pub fn lsp_position_to_point(position: Position) -> Point {
    Point {
        line: position.line,
        col: position.character,
    }
}

/// Convert Core Point to LSP Position
pub fn point_to_lsp_position(point: Point) -> Position {
    Position {
        line: point.line,
        character: point.col,
    }
}

/// Convert Core TextRange to LSP Range
pub fn text_range_to_lsp_range(range: TextRange) -> Range {
    Range {
        start: point_to_lsp_position(range.start),
        end: point_to_lsp_position(range.end),
    }
}

pub fn core_edit_to_lsp_edit(edit: CoreTextEdit) -> TextEdit {
    TextEdit {
        range: text_range_to_lsp_range(edit.range),
        new_text: edit.new_text,
    }
}

/// Render one candidate of `session` as a completion item.
///
/// `filter_text` is the raw query so that clients keep substring matches,
/// and `sort_text` pins the ranker's order.
pub fn candidate_to_completion_item(
    session: &SuggestSession,
    candidate: &Candidate,
    index: usize,
) -> CompletionItem {
    let (kind, detail) = match &candidate.kind {
        CandidateKind::Note => (CompletionItemKind::FILE, "Note".to_string()),
        CandidateKind::Heading { level } => {
            (CompletionItemKind::CLASS, format!("Heading H{}", level))
        }
        CandidateKind::Block { .. } => (CompletionItemKind::FIELD, "Block Anchor".to_string()),
    };

    CompletionItem {
        label: candidate.display.clone(),
        kind: Some(kind),
        detail: Some(format!("{} in {}", detail, candidate.note.title)),
        filter_text: Some(session.span.query.clone()),
        sort_text: Some(format!("{:04}", index)),
        text_edit: session
            .rewrite(candidate)
            .map(|edit| CompletionTextEdit::Edit(core_edit_to_lsp_edit(edit))),
        ..Default::default()
    }
}

pub fn session_to_completion_items(session: &SuggestSession) -> Vec<CompletionItem> {
    session
        .candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| candidate_to_completion_item(session, candidate, index))
        .collect()
}

/// Completion lists are always incomplete: candidates are recomputed on
/// every keystroke and block matches may still be on their way.
pub fn session_to_completion_list(session: &SuggestSession) -> CompletionList {
    CompletionList {
        is_incomplete: true,
        items: session_to_completion_items(session),
    }
}
