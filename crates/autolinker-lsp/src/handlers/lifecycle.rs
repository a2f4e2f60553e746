use crate::handlers::configuration::apply_settings;
use crate::protocol::{INSERT_SUGGESTION, TRIGGER_LINK_SUGGESTIONS};
use crate::state::GlobalState;
use autolinker_core::{Vault, Workspace};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "initialize" request
pub async fn handle_initialize(
    client: &Client,
    state: &GlobalState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    if let Some(options) = params.initialization_options {
        apply_settings(client, state, options).await;
    }

    if let Some(uri) = params.root_uri {
        if let Ok(root_path) = uri.to_file_path() {
            client
                .log_message(
                    MessageType::INFO,
                    format!("Initializing workspace at: {:?}", root_path),
                )
                .await;

            let fs = state.fs.clone();
            let (vault, files, stats) = tokio::task::spawn_blocking(move || {
                let workspace = Workspace::new();
                let mut v = Vault::new(workspace, fs);
                let (files, stats) = v.initialize(root_path);
                (v, files, stats)
            })
            .await
            .map_err(|e| tower_lsp::jsonrpc::Error {
                code: tower_lsp::jsonrpc::ErrorCode::InternalError,
                message: format!("Failed to initialize workspace: {}", e).into(),
                data: None,
            })?;

            client
                .log_message(
                    MessageType::INFO,
                    format!("Found {} markdown files", files.len()),
                )
                .await;

            client
                .log_message(
                    MessageType::INFO,
                    format!(
                        "Indexed {} notes ({} headings, {} blocks, {} unreadable)",
                        stats.indexed, stats.headings, stats.blocks, stats.unreadable
                    ),
                )
                .await;

            let mut vault_lock = state.vault.write().await;
            *vault_lock = Some(vault);
        }
    } else {
        client
            .log_message(MessageType::WARNING, "No rootUri provided!")
            .await;
    }

    let markdown_files = FileOperationRegistrationOptions {
        filters: vec![FileOperationFilter {
            scheme: Some("file".to_string()),
            pattern: FileOperationPattern {
                glob: "**/*.md".to_string(),
                matches: None,
                options: None,
            },
        }],
    };

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider: Some(CompletionOptions {
                trigger_characters: Some(vec!["[".to_string()]),
                all_commit_characters: None,
                resolve_provider: Some(false),
                work_done_progress_options: Default::default(),
                completion_item: Default::default(),
            }),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![
                    TRIGGER_LINK_SUGGESTIONS.to_string(),
                    INSERT_SUGGESTION.to_string(),
                ],
                work_done_progress_options: Default::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: None,
                file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                    did_rename: Some(markdown_files),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "autolinker".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}
