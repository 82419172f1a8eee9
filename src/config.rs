// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::corpus::{DEFAULT_MAX_DOCUMENTS, DEFAULT_MIN_TOKEN_CHARS};
use crate::error::{ChatError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ENV_PREFIX: &str = "SPACE_BIO_CHAT";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub retrieval: RetrievalConfig,
    pub completion: CompletionConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub path: PathBuf,
    pub separator: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    pub max_documents: usize,
    /// Query tokens must be strictly longer than this many characters to count.
    pub min_token_chars: usize,
    pub fallback_documents: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub system_prompt: String,
    pub context_preamble: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub exit_keywords: Vec<String>,
    pub show_spinner: bool,
}

impl Config {
    /// Built-in defaults, then the TOML file if present, then `SPACE_BIO_CHAT__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| ChatError::Config(e.to_string()))?;

        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        if !path.exists() {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
        }

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("space_biology_knowledge_optimized.txt"),
                separator: "---".to_string(),
            },
            retrieval: RetrievalConfig {
                max_documents: DEFAULT_MAX_DOCUMENTS,
                min_token_chars: DEFAULT_MIN_TOKEN_CHARS,
                fallback_documents: 2,
            },
            completion: CompletionConfig {
                api_base: "https://api.openai.com/v1".to_string(),
                api_key: None,
                api_key_env: "OPENAI_API_KEY".to_string(),
                model: "gpt-4o-mini".to_string(),
                max_tokens: 400,
                temperature: 0.7,
                timeout_secs: 60,
                system_prompt: "You are a helpful NASA Space Biology Expert. Answer questions \
                                based on the provided research context."
                    .to_string(),
                context_preamble: "Based on this NASA space biology research:".to_string(),
            },
            session: SessionConfig {
                history_limit: 6,
                exit_keywords: vec!["quit".to_string(), "exit".to_string(), "bye".to_string()],
                show_spinner: true,
            },
        }
    }

    /// Explicit key wins; otherwise read the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.completion
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(&self.completion.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.corpus.separator.is_empty() {
            return Err(ChatError::Config(
                "corpus.separator must not be empty".to_string(),
            ));
        }

        if self.retrieval.max_documents == 0 {
            return Err(ChatError::Config(
                "retrieval.max_documents must be greater than 0".to_string(),
            ));
        }

        if self.session.history_limit == 0 {
            return Err(ChatError::Config(
                "session.history_limit must be greater than 0".to_string(),
            ));
        }

        if self.completion.max_tokens == 0 {
            return Err(ChatError::Config(
                "completion.max_tokens must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(ChatError::Config(format!(
                "completion.temperature must be within 0.0..=2.0, got {}",
                self.completion.temperature
            )));
        }

        Validator::validate_url(&self.completion.api_base)
            .map_err(|e| ChatError::Config(format!("completion.api_base: {}", e)))?;

        Ok(())
    }
}
