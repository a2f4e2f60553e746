use crate::block_scanner::spawn_block_read;
use crate::conversion::{lsp_position_to_point, session_to_completion_list};
use crate::state::GlobalState;
use autolinker_core::line_map::LineMap;
use autolinker_core::rank::{rank, scan_blocks};
use autolinker_core::trigger::detect;
use autolinker_core::SuggestSession;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "textDocument/completion" request
pub async fn handle_completion(
    _client: &Client,
    state: &GlobalState,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = &params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    // 1. Get document content
    let document_text = {
        let cache = state.document_cache.read().await;
        cache.get(uri).cloned()
    };

    let Some(document_text) = document_text else {
        return Ok(None);
    };

    // 2. Current line (LSP positions are UTF-16 based, as are core Points)
    let line_map = LineMap::new(&document_text);
    let Some(line_text) = line_map.line_text(&document_text, position.line as usize) else {
        return Ok(None);
    };

    // 3. Trigger detection
    let config = state.config.read().await.suggest.clone();
    let Some(span) = detect(line_text, lsp_position_to_point(position), &config) else {
        state.close_session().await;
        return Ok(None);
    };

    // 4. Same trigger as the live session: answer from it, late blocks included
    {
        let session = state.session.read().await;
        if let Some(live) = session.as_ref().filter(|s| s.matches(uri.as_str(), &span)) {
            return Ok(Some(CompletionResponse::List(session_to_completion_list(live))));
        }
    }

    // 5. Rank titles and headings now
    let current_path = uri.to_file_path().ok();
    let ranking = {
        let vault_lock = state.vault.read().await;
        let Some(vault) = &*vault_lock else {
            return Ok(None);
        };
        rank(&span.query, vault, current_path.as_deref(), &config)
    };

    let query = span.query.clone();
    let id = state.sessions.begin();
    let mut session =
        SuggestSession::new(id, uri.as_str(), span, &ranking, config.max_suggestions);

    // 6. Blocks of notes whose body is already at hand are matched right away,
    //    the rest are read in the background
    let mut unread = Vec::new();
    for lookup in ranking.block_lookups {
        match state.known_body(&lookup.note.path).await {
            Some(body) => session.absorb(scan_blocks(&lookup, &body, &query)),
            None => unread.push(lookup),
        }
    }

    let response = session_to_completion_list(&session);
    {
        let mut live = state.session.write().await;
        // A newer keystroke may have started its own session meanwhile
        if !state.sessions.is_current(id) {
            return Ok(Some(CompletionResponse::List(response)));
        }
        *live = Some(session);
    }

    log::debug!(
        "session {:?} for {:?}: {} candidates, {} block reads pending",
        id,
        query,
        response.items.len(),
        unread.len()
    );

    for lookup in unread {
        spawn_block_read(state, id, query.clone(), lookup);
    }

    Ok(Some(CompletionResponse::List(response)))
}
