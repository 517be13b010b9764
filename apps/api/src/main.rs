mod ats;
mod auth;
mod config;
mod counselor;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod profile;
mod resume;
mod routes;
mod session;
mod state;
mod store;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats::KeywordAtsScorer;
use crate::auth::firebase::FirebaseTokenVerifier;
use crate::config::Config;
use crate::counselor::CounselorService;
use crate::db::create_pool;
use crate::errors::handle_panic;
use crate::llm_client::LlmClient;
use crate::resume::ResumeContext;
use crate::routes::build_router;
use crate::session::{memory::MemorySessionStore, redis_store::RedisSessionStore, SessionStore};
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL document store
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize session cache (Redis when configured)
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let redis_store = RedisSessionStore::connect(&client).await?;
            info!("Redis session store initialized");
            Arc::new(redis_store)
        }
        None => {
            warn!("REDIS_URL not set; using in-process session store");
            Arc::new(MemorySessionStore::new())
        }
    };
    let resumes = ResumeContext::new(
        store.clone(),
        sessions,
        Duration::from_secs(config.session_ttl_secs),
    );

    // Initialize auth verifier
    let verifier = FirebaseTokenVerifier::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?,
        config.firebase_api_key.clone(),
    );

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        Duration::from_secs(config.ai_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        store,
        resumes,
        verifier: Arc::new(verifier),
        ats: Arc::new(KeywordAtsScorer),
        counselor: CounselorService::new(Arc::new(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .layer(CatchPanicLayer::custom(handle_panic));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the configured origins; permissive when none are set.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {o:?}");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        warn!("CORS_ORIGINS not set; allowing any origin");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
