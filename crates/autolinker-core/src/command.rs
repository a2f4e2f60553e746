use crate::line_map::col_to_byte;
use crate::model::{Point, TextEdit, TextRange};
use crate::syntax::WikiLink;

/// Manual "trigger link suggestions" action.
///
/// Inserts `[[` at the cursor unless the text before it already ends with
/// one. The inserted token then opens a session through the usual trigger
/// detection on the next completion request.
pub fn open_link(line_text: &str, cursor: Point) -> Option<TextEdit> {
    let cursor_byte = col_to_byte(line_text, cursor.col)?;
    if line_text[..cursor_byte].ends_with(WikiLink::OPEN) {
        return None;
    }

    Some(TextEdit {
        range: TextRange {
            start: cursor,
            end: cursor,
        },
        new_text: WikiLink::OPEN.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuggestConfig;
    use crate::rewrite::apply;
    use crate::trigger::detect;

    #[test]
    fn test_open_link_inserts_token() {
        let line = "See ";
        let cursor = Point { line: 2, col: 4 };
        let edit = open_link(line, cursor).unwrap();
        assert_eq!(edit.new_text, "[[");
        assert_eq!(edit.range.start, cursor);
        assert_eq!(edit.range.end, cursor);

        let updated = apply(line, &edit).unwrap();
        assert_eq!(updated, "See [[");

        let after = Point { line: 2, col: 6 };
        let span = detect(&updated, after, &SuggestConfig::default()).unwrap();
        assert!(span.is_link_context);
        assert_eq!(span.query, "");
    }

    #[test]
    fn test_open_link_noop_after_token() {
        let cursor = Point { line: 0, col: 6 };
        assert_eq!(open_link("See [[", cursor), None);
    }

    #[test]
    fn test_open_link_mid_line() {
        let line = "ab[[cd";
        assert_eq!(open_link(line, Point { line: 0, col: 4 }), None);
        assert!(open_link(line, Point { line: 0, col: 6 }).is_some());
    }

    #[test]
    fn test_open_link_cursor_out_of_range() {
        assert_eq!(open_link("abc", Point { line: 0, col: 10 }), None);
    }
}
