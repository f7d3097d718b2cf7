use anyhow::{Context, Result};
use async_trait::async_trait;

use super::models::{ClaudeRequest, ClaudeResponse};
use super::{history_window, parse_decision, routing_prompt, Decision, Message, Router};
use crate::config::Config;
use crate::tools::ToolRegistry;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Routing via the Anthropic Messages API.
pub struct ClaudeRouter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    history_budget: usize,
}

impl ClaudeRouter {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .anthropic_api_key
            .clone()
            .context("ANTHROPIC_API_KEY must be set for the claude backend")?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.claude_model.clone(),
            history_budget: config.history_budget,
        })
    }

    async fn send_request(&self, request: &ClaudeRequest) -> Result<ClaudeResponse> {
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("failed to send request to the Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error: {status}: {text}");
        }

        response
            .json()
            .await
            .context("failed to parse the Anthropic API response")
    }
}

#[async_trait]
impl Router for ClaudeRouter {
    fn backend_name(&self) -> &'static str {
        "claude"
    }

    async fn select(
        &self,
        query: &str,
        history: &[Message],
        registry: &ToolRegistry,
    ) -> Result<Decision> {
        let mut messages = history_window(history, self.history_budget).to_vec();
        messages.push(Message::user(query));

        let request = ClaudeRequest {
            model: self.model.clone(),
            messages,
            max_tokens: 1024,
            temperature: Some(0.0),
            system: Some(routing_prompt(registry)),
        };

        let response = self.send_request(&request).await?;
        let content = response
            .content
            .first()
            .context("empty response from the Anthropic API")?;

        Ok(parse_decision(&content.text, registry))
    }
}
