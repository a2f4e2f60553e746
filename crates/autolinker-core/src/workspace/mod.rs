use crate::store::Store;

mod indexer;
mod queries;
mod vault;

#[cfg(test)]
mod tests;

pub use indexer::{Indexer, IndexingStats};
pub use vault::{read_body, Vault};

/// In-memory index of every note in the vault
#[derive(Default)]
pub struct Workspace {
    pub(crate) store: Store,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }
}
