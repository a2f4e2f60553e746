use std::path::Path;

use crate::corpus::Corpus;
use crate::model::Note;

use super::Workspace;

impl Workspace {
    pub fn note_by_path(&self, path: &Path) -> Option<&Note> {
        self.store.get_note(path)
    }

    pub fn all_notes(&self) -> Vec<&Note> {
        self.store.all_notes().collect()
    }

    pub fn note_count(&self) -> usize {
        self.store.len()
    }
}

impl Corpus for Workspace {
    fn notes(&self) -> Vec<&Note> {
        self.all_notes()
    }
}
