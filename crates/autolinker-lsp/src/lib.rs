//! Autolinker LSP Library
//!
//! LSP protocol layer, converts JSON-RPC requests to Core library calls.

use autolinker_core::vfs::{FileSystem, PhysicalFileSystem};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

use crate::block_scanner::BlockScanner;
use crate::state::GlobalState;

mod block_scanner;
mod config;
mod conversion;
mod handlers;
pub mod protocol;
mod state;


pub use config::{LogLevel, LspSettings};

/// LSP backend implementation
pub struct Backend {
    client: Client,
    state: GlobalState,
}

impl Backend {
    pub fn new(client: Client, fs: Arc<dyn FileSystem>) -> Self {
        let (block_sender, block_receiver) = mpsc::unbounded_channel();
        let state = GlobalState::new(fs, block_sender);

        let scanner = BlockScanner::new(client.clone(), state.clone(), block_receiver);
        tokio::spawn(scanner.start());

        Self { client, state }
    }
}

#[tower_lsp::async_trait]
impl tower_lsp::LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::handle_initialize(&self.client, &self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("✅ Client initialized, ready to accept requests");
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("🛑 Shutdown requested");
        self.state.close_session().await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::handle_did_open(&self.state, params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::handle_did_change(&self.state, params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::handle_did_close(&self.state, params).await
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::handle_did_change_watched_files(&self.state, params).await
    }

    async fn did_rename_files(&self, params: RenameFilesParams) {
        handlers::handle_did_rename_files(&self.state, params).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::handle_did_change_configuration(&self.client, &self.state, params).await
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::handle_completion(&self.client, &self.state, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handlers::handle_execute_command(&self.client, &self.state, params).await
    }
}

/// Create and return LSP service and client socket
pub fn create_lsp_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    let fs: Arc<dyn FileSystem> = Arc::new(PhysicalFileSystem);
    LspService::new(move |client| Backend::new(client, fs.clone()))
}
