/// Wikilink delimiters
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    /// Prefix of a heading anchor inside a link target
    pub const HEADING: &'static str = "#";
    /// Prefix of a block anchor inside a link target
    pub const BLOCK: &'static str = "#^";

    /// `[[target]]`
    pub fn wrap(target: &str) -> String {
        format!("{}{}{}", Self::OPEN, target, Self::CLOSE)
    }

    /// `target]]`, for when the opening token is already in the buffer
    pub fn close(target: &str) -> String {
        format!("{}{}", target, Self::CLOSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_and_close() {
        assert_eq!(WikiLink::wrap("Note A"), "[[Note A]]");
        assert_eq!(WikiLink::close("#^abc"), "#^abc]]");
    }
}
