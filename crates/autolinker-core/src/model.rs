use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core internal coordinate system (0-based)
/// Does not directly use LSP Position to avoid coupling.
/// `col` counts UTF-16 code units, the unit editors address lines with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: u32,
    pub col: u32,
}

/// Half-open range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub range: TextRange,
}

/// Addressable anchor inside a note body (`paragraph text ^block-id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub range: TextRange,
}

impl Block {
    /// Source line the block starts on
    pub fn line(&self) -> usize {
        self.range.start.line as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub path: PathBuf,
    pub title: String,
    pub headings: Vec<Heading>,
    pub blocks: Vec<Block>,
}

impl Note {
    pub fn new(path: PathBuf, headings: Vec<Heading>, blocks: Vec<Block>) -> Self {
        let title = title_from_path(&path);
        Self {
            path,
            title,
            headings,
            blocks,
        }
    }
}

/// Display title of a note: the file basename without its extension
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Lightweight reference from a candidate back to the note that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    pub path: PathBuf,
    pub title: String,
}

impl From<&Note> for NoteRef {
    fn from(note: &Note) -> Self {
        Self {
            path: note.path.clone(),
            title: note.title.clone(),
        }
    }
}

/// A single atomic range replacement handed to the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}
