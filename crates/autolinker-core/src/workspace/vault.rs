use super::{Indexer, IndexingStats, Workspace};
use crate::corpus::{BodySource, Corpus, CorpusError};
use crate::model::Note;
use crate::vfs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The Vault acts as the high-level Facade over the note index.
///
/// *   **Sync (Write)**: changes coming from disk or from the editor go
///     through `Vault` so that the index and the file system stay paired.
/// *   **Queries (Read)**: the vault is itself a [`Corpus`] and a
///     [`BodySource`]; read-only callers can also use `vault.workspace`.
pub struct Vault {
    pub workspace: Workspace,
    pub fs: Arc<dyn FileSystem>,
}

impl Vault {
    pub fn new(workspace: Workspace, fs: Arc<dyn FileSystem>) -> Self {
        Self { workspace, fs }
    }

    // ------------------------------------------------------------------------
    // File System Sync (Changes coming FROM disk or the editor)
    // ------------------------------------------------------------------------

    pub fn initialize(&mut self, root: PathBuf) -> (Vec<PathBuf>, IndexingStats) {
        Indexer::new(&mut self.workspace, &*self.fs).full_index(root)
    }

    /// Re-parse `path` from text the caller already holds (editor buffer or
    /// a fresh disk read)
    pub fn update_content(&mut self, path: PathBuf, content: &str) {
        Indexer::new(&mut self.workspace, &*self.fs).update_content(path, content);
    }

    pub fn delete_file(&mut self, path: &Path) {
        Indexer::new(&mut self.workspace, &*self.fs).delete_file(path);
    }

    pub fn rename_file(&mut self, old_path: PathBuf, new_path: PathBuf, content: &str) {
        Indexer::new(&mut self.workspace, &*self.fs).rename_file(old_path, new_path, content);
    }
}

impl Corpus for Vault {
    fn notes(&self) -> Vec<&Note> {
        self.workspace.all_notes()
    }
}

impl BodySource for Vault {
    fn read_body(&self, path: &Path) -> Result<String, CorpusError> {
        read_body(&*self.fs, path)
    }
}

/// Body read through a file system handle, detached from any vault borrow
pub fn read_body(fs: &dyn FileSystem, path: &Path) -> Result<String, CorpusError> {
    fs.read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })
}
