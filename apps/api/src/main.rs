mod config;
mod errors;
mod llm_client;
mod models;
mod parsing;
mod reconcile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{AnthropicProvider, CompletionProvider, OpenAiProvider};
use crate::parsing::ResumeParser;
use crate::reconcile::vocabulary::Vocabulary;
use crate::reconcile::Reconciler;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume reconciler v{}", env!("CARGO_PKG_VERSION"));
    for key in &config.rejected_keys {
        warn!("{key} is set but does not look like a real key; provider disabled");
    }

    let vocabulary = Arc::new(match &config.vocabulary_path {
        Some(path) => Vocabulary::from_json_file(path)?,
        None => Vocabulary::default(),
    });
    info!(
        skills = vocabulary.skills.len(),
        job_titles = vocabulary.job_titles.len(),
        "Vocabulary loaded"
    );

    let providers = build_providers(&config)?;
    info!(
        providers = providers.len(),
        timeout_secs = config.provider_timeout.as_secs(),
        "Generative providers configured"
    );

    let state = AppState {
        reconciler: Arc::new(Reconciler::new(vocabulary.clone())),
        parser: Arc::new(ResumeParser::new(
            providers,
            config.provider_timeout,
            vocabulary,
        )),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One adapter per configured key, in a fixed order: Anthropic, then OpenAI.
fn build_providers(config: &Config) -> Result<Vec<Arc<dyn CompletionProvider>>> {
    let mut providers: Vec<Arc<dyn CompletionProvider>> = Vec::new();
    if let Some(key) = &config.anthropic_api_key {
        providers.push(Arc::new(AnthropicProvider::new(key.clone())?));
        info!("Anthropic provider enabled (model: {})", llm_client::anthropic::MODEL);
    }
    if let Some(key) = &config.openai_api_key {
        providers.push(Arc::new(OpenAiProvider::new(key.clone())?));
        info!("OpenAI provider enabled (model: {})", llm_client::openai::MODEL);
    }
    Ok(providers)
}
