use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use dossier_core::{Config, Engine, EngineOptions};
use dossier_llm::ollama::OllamaProvider;
use dossier_search::SearchStore;
use dossier_telegram::BotSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)?;
    config.validate()?;

    if config.telegram.token.is_empty() {
        bail!("telegram.token is empty: set it in the config file or via DOSSIER_TELEGRAM_TOKEN");
    }

    let provider = OllamaProvider::new(
        &config.llm.base_url,
        config.llm.model.clone(),
        config.llm.embedding_model.clone(),
    );
    health_check(&provider).await;

    let store = SearchStore::new(
        &config.search.url,
        &config.search.index_prefix,
        config.search.embedding_dims,
    );
    match store.ping().await {
        Ok(()) => tracing::info!(url = %config.search.url, "search backend reachable"),
        Err(e) => tracing::warn!("search backend unreachable: {e}"),
    }

    let engine = Engine::new(
        Arc::new(provider),
        store,
        config.search.embedding_dims,
        EngineOptions::from_config(&config),
    );

    tracing::info!(bot = %config.bot.name, model = %config.llm.model, "starting dossier");
    dossier_telegram::run(
        config.telegram.token.clone(),
        engine,
        BotSettings::from_config(&config),
    )
    .await;
    Ok(())
}

async fn health_check(provider: &OllamaProvider) {
    match provider.health_check().await {
        Ok(()) => tracing::info!("ollama health check passed"),
        Err(e) => tracing::warn!("ollama health check failed: {e}"),
    }
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("DOSSIER_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}
