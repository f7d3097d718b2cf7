use anyhow::{Context, Result};
use async_trait::async_trait;
use ollama_rs::generation::chat::{request::ChatMessageRequest, ChatMessage};
use ollama_rs::Ollama;

use super::{history_window, parse_decision, routing_prompt, Decision, Message, Role, Router};
use crate::config::Config;
use crate::tools::ToolRegistry;

/// Routing via a local Ollama model.
pub struct OllamaRouter {
    client: Ollama,
    model: String,
    history_budget: usize,
}

impl OllamaRouter {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Ollama::new(config.ollama_host.clone(), config.ollama_port),
            model: config.ollama_model.clone(),
            history_budget: config.history_budget,
        }
    }

    fn to_chat_message(message: &Message) -> ChatMessage {
        match message.role {
            Role::User => ChatMessage::user(message.content.clone()),
            Role::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}

#[async_trait]
impl Router for OllamaRouter {
    fn backend_name(&self) -> &'static str {
        "ollama"
    }

    async fn select(
        &self,
        query: &str,
        history: &[Message],
        registry: &ToolRegistry,
    ) -> Result<Decision> {
        let mut chat_messages = vec![ChatMessage::system(routing_prompt(registry))];
        chat_messages.extend(
            history_window(history, self.history_budget)
                .iter()
                .map(Self::to_chat_message),
        );
        chat_messages.push(ChatMessage::user(query.to_string()));

        let request = ChatMessageRequest::new(self.model.clone(), chat_messages);
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .context("failed to get a routing reply from Ollama")?;

        Ok(parse_decision(&response.message.content, registry))
    }
}
