use autolinker_core::rank::{scan_blocks, BlockLookup};
use autolinker_core::workspace::read_body;
use autolinker_core::{BlockUpdate, CorpusError, SessionId};
use tokio::sync::mpsc::UnboundedReceiver;
use tower_lsp::Client;
use url::Url;

use crate::conversion::session_to_completion_items;
use crate::protocol::{BlockSuggestions, BlockSuggestionsParams};
use crate::state::GlobalState;

/// A finished (or failed) body read, tagged with the session it was issued for
pub struct BlockRead {
    pub session: SessionId,
    pub query: String,
    pub lookup: BlockLookup,
    pub body: Result<String, CorpusError>,
}

/// Read the body behind `lookup` off the request path and report back
pub fn spawn_block_read(
    state: &GlobalState,
    session: SessionId,
    query: String,
    lookup: BlockLookup,
) {
    let fs = state.fs.clone();
    let sender = state.block_sender.clone();

    tokio::spawn(async move {
        let path = lookup.note.path.clone();
        let body = tokio::task::spawn_blocking({
            let path = path.clone();
            move || read_body(&*fs, &path)
        })
        .await
        .unwrap_or_else(|_| Err(CorpusError::Cancelled(path)));

        // The scanner only stops when the server shuts down
        let _ = sender.send(BlockRead {
            session,
            query,
            lookup,
            body,
        });
    });
}

/// Merges finished block reads into the live session
pub struct BlockScanner {
    client: Client,
    state: GlobalState,
    receiver: UnboundedReceiver<BlockRead>,
}

impl BlockScanner {
    pub fn new(
        client: Client,
        state: GlobalState,
        receiver: UnboundedReceiver<BlockRead>,
    ) -> Self {
        Self {
            client,
            state,
            receiver,
        }
    }

    pub async fn start(mut self) {
        log::debug!("block scanner started");

        while let Some(read) = self.receiver.recv().await {
            self.handle_read(read).await;
        }

        log::debug!("block scanner stopped");
    }

    async fn handle_read(&self, read: BlockRead) {
        let BlockRead {
            session,
            query,
            lookup,
            body,
        } = read;

        let candidates = match body {
            Ok(body) => {
                let candidates = scan_blocks(&lookup, &body, &query);
                self.state
                    .body_cache
                    .write()
                    .await
                    .insert(lookup.note.path.clone(), body);
                candidates
            }
            Err(e) => {
                log::debug!("no block matches from {:?}: {}", lookup.note.path, e);
                Vec::new()
            }
        };

        if !self.state.sessions.is_current(session) {
            log::trace!("dropping block read for superseded session {:?}", session);
            return;
        }

        let notification = {
            let mut session_lock = self.state.session.write().await;
            let Some(live) = session_lock.as_mut() else {
                return;
            };

            let changed = !candidates.is_empty();
            if !live.apply_update(BlockUpdate {
                session,
                query,
                candidates,
            }) {
                return;
            }

            if !changed && !live.is_complete() {
                return;
            }

            let Ok(uri) = Url::parse(&live.document) else {
                return;
            };
            BlockSuggestionsParams {
                session: live.id,
                uri,
                is_complete: live.is_complete(),
                items: session_to_completion_items(live),
            }
        };

        self.client
            .send_notification::<BlockSuggestions>(notification)
            .await;
    }
}
