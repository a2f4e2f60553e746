use super::Workspace;
use crate::model::Note;
use crate::parser::parse_markdown;
use crate::vfs::FileSystem;
use std::path::{Path, PathBuf};

pub const NOTE_EXTENSION: &str = "md";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexingStats {
    pub total_files: usize,
    pub indexed: usize,
    pub unreadable: usize,
    pub headings: usize,
    pub blocks: usize,
}

/// Indexer responsible for orchestrating the indexing process.
/// It bridges I/O (FileSystem) and Workspace state.
pub struct Indexer<'a> {
    workspace: &'a mut Workspace,
    fs: &'a dyn FileSystem,
    stats: IndexingStats,
}

impl<'a> Indexer<'a> {
    pub fn new(workspace: &'a mut Workspace, fs: &'a dyn FileSystem) -> Self {
        Self {
            workspace,
            fs,
            stats: IndexingStats::default(),
        }
    }

    /// Performs a full index of the workspace.
    pub fn full_index(&mut self, root: PathBuf) -> (Vec<PathBuf>, IndexingStats) {
        let files = self.fs.list_files(&root, NOTE_EXTENSION);
        self.stats.total_files = files.len();

        for path in &files {
            self.index_file(path.clone());
        }

        log::info!(
            "indexed {} of {} notes ({} headings, {} blocks)",
            self.stats.indexed,
            self.stats.total_files,
            self.stats.headings,
            self.stats.blocks
        );

        (files, self.stats.clone())
    }

    /// Indexes a single file from disk.
    pub fn index_file(&mut self, path: PathBuf) {
        match self.fs.read_to_string(&path) {
            Ok(content) => self.update_content(path, &content),
            Err(e) => {
                self.stats.unreadable += 1;
                log::warn!("cannot read {:?}: {}", path, e);
            }
        }
    }

    /// Updates or creates a note from provided content.
    pub fn update_content(&mut self, path: PathBuf, content: &str) {
        if !is_note_path(&path) {
            return;
        }

        let parse_result = parse_markdown(content);
        self.stats.indexed += 1;
        self.stats.headings += parse_result.headings.len();
        self.stats.blocks += parse_result.blocks.len();

        let note = Note::new(path, parse_result.headings, parse_result.blocks);
        log::debug!(
            "indexed {:?}: {} headings, {} blocks",
            note.path,
            note.headings.len(),
            note.blocks.len()
        );
        self.workspace.store.upsert_note(note);
    }

    /// Handles file renaming.
    pub fn rename_file(&mut self, old_path: PathBuf, new_path: PathBuf, content: &str) {
        self.workspace.store.remove_note(&old_path);
        self.update_content(new_path, content);
    }

    pub fn delete_file(&mut self, path: &Path) {
        if self.workspace.store.remove_note(path).is_some() {
            log::debug!("removed {:?} from index", path);
        }
    }
}

pub(crate) fn is_note_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTE_EXTENSION)
}
