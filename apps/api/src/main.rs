use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use referral_node_api::ai::GenAiClient;
use referral_node_api::config::Config;
use referral_node_api::routes::build_router;
use referral_node_api::state::AppState;
use referral_node_api::store::{JobStore, MemoryJobStore, PgJobStore};
use referral_node_api::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a malformed PORT)
    let config = Config::from_env()?;

    telemetry::init(&config.rust_log);

    info!("Starting Referral Node API v{}", env!("CARGO_PKG_VERSION"));

    // Select the job store: Postgres when configured, in-memory otherwise
    let store: Arc<dyn JobStore> = match &config.database_url {
        Some(url) => Arc::new(PgJobStore::connect(url).await?),
        None => {
            warn!("DATABASE_URL not set; using the in-memory job store (data is not persisted)");
            Arc::new(MemoryJobStore::new())
        }
    };

    // Initialize the generative-AI client
    let ai = GenAiClient::new(config.gemini_api_key.clone());
    if !ai.has_key() {
        warn!("GEMINI_API_KEY not set; AI routes will serve canned fallback responses");
    }

    let state = AppState {
        store,
        ai,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
