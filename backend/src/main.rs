//! PDF Chat Backend
//!
//! A small HTTP server that relays chat messages to Gemini, optionally
//! grounding answers in the text of one uploaded PDF.

use pdf_chat_backend::{
    api,
    chat::ChatSession,
    config::Config,
    document::PdfTextExtractor,
    llm::GeminiClient,
    state::AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    if config.gemini.api_key.is_none() {
        warn!("GOOGLE_API_KEY not set. Chat and health calls will fail until it is provided.");
    }

    let client = GeminiClient::from_config(&config.gemini)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini client: {}", e))?;
    let session = ChatSession::new(
        config.gemini.model.clone(),
        Arc::new(client),
        Arc::new(PdfTextExtractor),
        config.document.clone(),
    );
    let app = api::router(AppState::new(session, &config.document));

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!(model = %config.gemini.model, "Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
