use std::sync::Arc;
use std::time::Duration;

use moom::api::{self, app_state::AppState};
use moom::config::loader::ConfigLoader;
use moom::llm::HttpLlmClient;
use moom::observability::{ObservabilityState, create_observability_router, init_tracing};
use moom::storage::StorageFactory;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    // 日志 guard 需存活到进程结束
    let _log_guard = init_tracing(&config.logging)?;
    info!(
        "Starting {} ({} environment)",
        config.app_name, config.environment
    );

    let stores = StorageFactory::create(&config).await?;
    info!("Storage initialized (backend: {})", config.storage.backend);

    let chat_store = StorageFactory::create_chat_store(&config.cache).await?;
    info!("Chat store initialized (backend: {})", config.cache.backend);

    let llm = Arc::new(HttpLlmClient::new(&config.llm)?);
    info!("LLM client initialized: {} @ {}", config.llm.model, config.llm.base_url);

    let app_state = AppState::new(&stores, chat_store, llm);

    let observability_state = Arc::new(ObservabilityState::new(env!("CARGO_PKG_VERSION")));
    let api_router = api::create_router(
        app_state,
        Duration::from_secs(config.server.request_timeout),
    );
    let router = create_observability_router(observability_state).merge(api_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
