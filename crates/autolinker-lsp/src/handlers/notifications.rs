use crate::state::GlobalState;
use tower_lsp::lsp_types::*;

/// Handle "textDocument/didOpen" notification
pub async fn handle_did_open(state: &GlobalState, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let text = params.text_document.text;
    update_document(state, uri, text).await;
}

/// Handle "textDocument/didChange" notification
pub async fn handle_did_change(state: &GlobalState, params: DidChangeTextDocumentParams) {
    // Full sync: the last change carries the whole document
    if let Some(last_change) = params.content_changes.into_iter().last() {
        update_document(state, params.text_document.uri, last_change.text).await;
    }
}

/// Handle "textDocument/didClose" notification
pub async fn handle_did_close(state: &GlobalState, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    state.document_cache.write().await.remove(&uri);

    if let Ok(path) = uri.to_file_path() {
        state.forget_body(&path).await;

        // Drop unsaved edits from the index in favour of what is on disk
        if let Ok(content) = state.fs.read_to_string(&path) {
            let mut vault_lock = state.vault.write().await;
            if let Some(v) = &mut *vault_lock {
                v.update_content(path, &content);
            }
        }
    }
}

async fn update_document(state: &GlobalState, uri: Url, text: String) {
    // Update document cache
    {
        let mut cache = state.document_cache.write().await;
        cache.insert(uri.clone(), text.clone());
    }

    if let Ok(path) = uri.to_file_path() {
        state.forget_body(&path).await;

        // Update vault
        let mut vault_lock = state.vault.write().await;
        if let Some(v) = &mut *vault_lock {
            v.update_content(path, &text);
        }
    }
}

/// Handle "workspace/didChangeWatchedFiles" notification
pub async fn handle_did_change_watched_files(
    state: &GlobalState,
    params: DidChangeWatchedFilesParams,
) {
    let mut vault_lock = state.vault.write().await;
    let Some(v) = &mut *vault_lock else {
        return;
    };

    for change in params.changes {
        let Ok(path) = change.uri.to_file_path() else {
            continue;
        };
        state.forget_body(&path).await;

        match change.typ {
            FileChangeType::CREATED | FileChangeType::CHANGED => {
                // Open documents are tracked through didChange
                if state.document_cache.read().await.contains_key(&change.uri) {
                    continue;
                }
                if let Ok(content) = state.fs.read_to_string(&path) {
                    v.update_content(path, &content);
                }
            }
            FileChangeType::DELETED => {
                state.document_cache.write().await.remove(&change.uri);
                v.delete_file(&path);
            }
            _ => {}
        }
    }
}

/// Handle "workspace/didRenameFiles" notification
pub async fn handle_did_rename_files(state: &GlobalState, params: RenameFilesParams) {
    let mut vault_lock = state.vault.write().await;
    let Some(v) = &mut *vault_lock else {
        return;
    };

    for file_rename in params.files {
        let (Ok(old_url), Ok(new_url)) = (
            file_rename.old_uri.parse::<Url>(),
            file_rename.new_uri.parse::<Url>(),
        ) else {
            continue;
        };
        let (Ok(old_path), Ok(new_path)) = (old_url.to_file_path(), new_url.to_file_path()) else {
            continue;
        };

        state.forget_body(&old_path).await;
        state.forget_body(&new_path).await;

        let content = {
            let mut cache = state.document_cache.write().await;
            match cache.remove(&old_url) {
                Some(open_text) => {
                    cache.insert(new_url.clone(), open_text.clone());
                    Some(open_text)
                }
                None => state.fs.read_to_string(&new_path).ok(),
            }
        };

        match content {
            Some(content) => v.rename_file(old_path, new_path, &content),
            None => v.delete_file(&old_path),
        }
    }
}
