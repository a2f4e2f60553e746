use autolinker_core::command::open_link;
use autolinker_core::line_map::LineMap;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{ExecuteCommandParams, TextDocumentPositionParams, Url};
use tower_lsp::Client;

use crate::conversion::lsp_position_to_point;
use crate::handlers::edit::apply_text_edit;
use crate::protocol::{InsertSuggestionParams, INSERT_SUGGESTION, TRIGGER_LINK_SUGGESTIONS};
use crate::state::GlobalState;

/// Handle "workspace/executeCommand" request
pub async fn handle_execute_command(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let command = params.command.clone();
    match command.as_str() {
        TRIGGER_LINK_SUGGESTIONS => handle_trigger_link_suggestions(client, state, params).await,
        INSERT_SUGGESTION => handle_insert_suggestion(client, state, params).await,
        other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
    }
}

fn first_argument<T: serde::de::DeserializeOwned>(params: &ExecuteCommandParams) -> Result<T> {
    let first_arg = params
        .arguments
        .first()
        .ok_or_else(|| Error::invalid_params("Missing params"))?;
    serde_json::from_value(first_arg.clone()).map_err(|_| Error::invalid_params("Invalid params"))
}

/// Insert `[[` at the cursor unless it is already there.
///
/// Returns whether an edit was applied.
pub async fn handle_trigger_link_suggestions(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let position: TextDocumentPositionParams = first_argument(&params)?;
    let uri = position.text_document.uri;

    let document_text = {
        let cache = state.document_cache.read().await;
        cache.get(&uri).cloned()
    };
    let Some(document_text) = document_text else {
        return Err(Error::invalid_params(format!("Document not open: {}", uri)));
    };

    let line_map = LineMap::new(&document_text);
    let Some(line_text) = line_map.line_text(&document_text, position.position.line as usize)
    else {
        return Err(Error::invalid_params("Position outside document"));
    };

    let Some(edit) = open_link(line_text, lsp_position_to_point(position.position)) else {
        return Ok(Some(serde_json::Value::Bool(false)));
    };

    apply_text_edit(client, uri, edit).await?;
    Ok(Some(serde_json::Value::Bool(true)))
}

/// Insert a candidate of the live session by index.
///
/// Selections for a session that is gone or was superseded are dropped
/// without an error.
pub async fn handle_insert_suggestion(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: InsertSuggestionParams = first_argument(&params)?;

    let pending = {
        let session = state.session.read().await;
        session
            .as_ref()
            .filter(|live| live.id == params.session)
            .and_then(|live| {
                let candidate = live.candidates.get(params.index)?;
                let edit = live.rewrite(candidate)?;
                let uri = Url::parse(&live.document).ok()?;
                Some((uri, edit))
            })
    };

    let Some((uri, edit)) = pending else {
        log::debug!("ignoring selection for stale session {:?}", params.session);
        return Ok(None);
    };

    state.close_session().await;
    apply_text_edit(client, uri, edit).await?;
    Ok(Some(serde_json::Value::Bool(true)))
}
