use crate::model::Note;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// In memory, ordered by path so ranking ties break the same way every time
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) notes: BTreeMap<PathBuf, Note>,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
        }
    }

    pub(crate) fn upsert_note(&mut self, note: Note) {
        self.notes.insert(note.path.clone(), note);
    }

    pub(crate) fn remove_note(&mut self, path: &Path) -> Option<Note> {
        self.notes.remove(path)
    }

    pub(crate) fn get_note(&self, path: &Path) -> Option<&Note> {
        self.notes.get(path)
    }

    pub(crate) fn all_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.notes.len()
    }
}
