use autolinker_core::vfs::FileSystem;
use autolinker_core::{SessionTracker, SuggestSession, Vault};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use url::Url;

use crate::block_scanner::BlockRead;
use crate::config::LspSettings;

/// Global state for LSP server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// RwLock-protected note index
    /// Read operations (completion) are concurrent
    /// Write operations (didChange) are exclusive
    pub vault: Arc<RwLock<Option<Vault>>>,
    /// Latest text of every open document
    pub document_cache: Arc<RwLock<HashMap<Url, String>>>,
    /// Note bodies from finished block reads, dropped when the note changes
    pub body_cache: Arc<RwLock<HashMap<PathBuf, String>>>,
    pub config: Arc<RwLock<LspSettings>>,
    pub fs: Arc<dyn FileSystem>,
    pub sessions: Arc<SessionTracker>,
    /// Session currently shown to the user, if any
    pub session: Arc<RwLock<Option<SuggestSession>>>,
    pub block_sender: UnboundedSender<BlockRead>,
}

impl GlobalState {
    pub fn new(fs: Arc<dyn FileSystem>, block_sender: UnboundedSender<BlockRead>) -> Self {
        Self {
            vault: Arc::new(RwLock::new(None)),
            document_cache: Arc::new(RwLock::new(HashMap::new())),
            body_cache: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(RwLock::new(LspSettings::default())),
            fs,
            sessions: Arc::new(SessionTracker::new()),
            session: Arc::new(RwLock::new(None)),
            block_sender,
        }
    }

    /// Text of a note body that is available without touching the disk
    pub async fn known_body(&self, path: &Path) -> Option<String> {
        if let Ok(uri) = Url::from_file_path(path) {
            if let Some(text) = self.document_cache.read().await.get(&uri) {
                return Some(text.clone());
            }
        }
        self.body_cache.read().await.get(path).cloned()
    }

    pub async fn forget_body(&self, path: &Path) {
        self.body_cache.write().await.remove(path);
    }

    /// Close the session shown to the user; late block reads for it are dropped
    pub async fn close_session(&self) {
        self.sessions.close();
        *self.session.write().await = None;
    }
}
