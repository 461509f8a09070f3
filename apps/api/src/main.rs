mod analysis;
mod config;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod resume;
mod routes;
mod search;
mod session;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmProvider, OpenAiClient};
use crate::routes::build_router;
use crate::search::DuckDuckGoClient;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter API v{}", env!("CARGO_PKG_VERSION"));

    // Generation stays disabled until a key is configured
    let llm: Option<Arc<dyn LlmProvider>> = match &config.openai_api_key {
        Some(key) => {
            info!("LLM client initialized ({})", config.openai_base_url);
            Some(Arc::new(OpenAiClient::new(
                key.clone(),
                config.openai_base_url.clone(),
            )))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; generation endpoints will return 412");
            None
        }
    };

    let search = Arc::new(DuckDuckGoClient::new(config.search_base_url.clone()));
    info!("Search client initialized ({})", config.search_base_url);

    let sessions = SessionStore::new();
    sessions.spawn_eviction(config.session_ttl);
    info!("Session TTL: {}s", config.session_ttl.as_secs());

    if let Some(dir) = &config.export_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export dir {}", dir.display()))?;
        info!("Exports are also written to {}", dir.display());
    }

    let state = AppState {
        llm,
        search,
        sessions,
        export_dir: config.export_dir.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
