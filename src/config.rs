use std::env;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::ValueEnum;

/// Which routing backend decides where a query goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Deterministic keyword scoring, no external service.
    Keyword,
    /// Ask a local Ollama model to pick a tool.
    Ollama,
    /// Ask the Anthropic API to pick a tool. Requires ANTHROPIC_API_KEY.
    Claude,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Keyword => "keyword",
            Backend::Ollama => "ollama",
            Backend::Claude => "claude",
        }
    }
}

/// Runtime configuration, sourced from the environment with CLI overrides
/// applied afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub anthropic_api_key: Option<String>,
    pub claude_model: String,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub ollama_model: String,
    /// History shown to LLM routers, in (estimated) tokens. Zero means
    /// unbounded.
    pub history_budget: usize,
    pub search_results: usize,
    pub search_timeout: Duration,
}

impl Config {
    /// Read configuration from the environment. `dotenv` is expected to have
    /// run already.
    pub fn from_env() -> Self {
        let backend = match env::var("MENTOR_BACKEND").ok().as_deref() {
            Some("ollama") => Backend::Ollama,
            Some("claude") => Backend::Claude,
            _ => Backend::Keyword,
        };

        Self {
            backend,
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string()),
            ollama_host: env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost".to_string()),
            ollama_port: env::var("OLLAMA_PORT")
                .unwrap_or_else(|_| "11434".to_string())
                .parse::<u16>()
                .unwrap_or(11434),
            ollama_model: env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| "llama3.2:latest".to_string()),
            history_budget: env::var("MENTOR_HISTORY_BUDGET")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(2048),
            search_results: env::var("MENTOR_SEARCH_RESULTS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3),
            search_timeout: Duration::from_secs(
                env::var("MENTOR_SEARCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }

    /// A missing credential for the claude backend is the one fatal startup
    /// condition; every other setting has a default.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Claude && self.anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is not set; the claude backend cannot start without it");
        }
        Ok(())
    }
}
