use autolinker_core::model::TextEdit as CoreTextEdit;
use std::collections::HashMap;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::{Url, WorkspaceEdit};
use tower_lsp::Client;

use crate::conversion::core_edit_to_lsp_edit;

/// Helper to apply a single core edit to `uri` via WorkspaceEdit
pub(crate) async fn apply_text_edit(client: &Client, uri: Url, edit: CoreTextEdit) -> Result<()> {
    let workspace_edit = WorkspaceEdit::new(HashMap::from([(
        uri,
        vec![core_edit_to_lsp_edit(edit)],
    )]));

    client
        .apply_edit(workspace_edit)
        .await?
        .applied
        .then_some(())
        .ok_or_else(|| Error {
            code: ErrorCode::InternalError,
            message: "Client failed to apply workspace edit".into(),
            data: None,
        })
}
