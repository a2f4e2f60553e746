//! Read contract the ranker needs from the indexed note store.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::Note;

/// Enumerates the notes available for linking, with their cached metadata
/// (headings and blocks).
pub trait Corpus {
    fn notes(&self) -> Vec<&Note>;
}

/// Reads the full body text of a note.
///
/// Callers treat this as a slow, possibly failing read and never let it hold
/// up title or heading matches.
pub trait BodySource: Send + Sync {
    fn read_body(&self, path: &Path) -> Result<String, CorpusError>;
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read of {0:?} was cancelled")]
    Cancelled(PathBuf),
}

impl Corpus for Vec<Note> {
    fn notes(&self) -> Vec<&Note> {
        self.iter().collect()
    }
}
