use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub ingest: IngestConfig,
    pub retrieval: RetrievalConfig,
    pub answer: AnswerConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub name: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "dossier".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Usually supplied via `DOSSIER_TELEGRAM_TOKEN` rather than the file.
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3".into(),
            embedding_model: "llama3".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub url: String,
    pub index_prefix: String,
    pub embedding_dims: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".into(),
            index_prefix: "docs-".into(),
            embedding_dims: 4096,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub chunk_size: usize,
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            max_file_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k_text: usize,
    pub top_k_vector: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k_text: 2,
            top_k_vector: 7,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub language: String,
    pub cited_chunks: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            language: "English".into(),
            cited_chunks: 3,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to built-in defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("DOSSIER_TELEGRAM_TOKEN") {
            self.telegram.token = v;
        }
        if let Ok(v) = std::env::var("DOSSIER_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("DOSSIER_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("DOSSIER_SEARCH_URL") {
            self.search.url = v;
        }
    }

    /// Reject values the pipeline cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ingest.chunk_size == 0 {
            bail!("ingest.chunk_size must be at least 1");
        }
        if self.search.embedding_dims == 0 {
            bail!("search.embedding_dims must be at least 1");
        }
        if self.retrieval.top_k_text == 0 {
            bail!("retrieval.top_k_text must be at least 1");
        }
        if self.retrieval.top_k_vector == 0 {
            bail!("retrieval.top_k_vector must be at least 1");
        }
        if self.search.index_prefix.is_empty() {
            bail!("search.index_prefix must not be empty");
        }
        Ok(())
    }
}
