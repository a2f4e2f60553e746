//! Autolinker LSP Server Binary Entry Point

use autolinker_lsp::create_lsp_service;
use tower_lsp::Server;

#[tokio::main]
async fn main() {
    env_logger::init();

    log::info!("🚀 Autolinker LSP Server starting...");
    log::info!("📝 Listening on stdin/stdout...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_lsp_service();
    log::info!("✅ LSP service created, waiting for client connection...");

    Server::new(stdin, stdout, socket).serve(service).await;
}
