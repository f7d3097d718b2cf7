mod claude;
mod keyword;
mod models;
mod ollama;

pub use claude::ClaudeRouter;
pub use keyword::KeywordRouter;
pub use models::{Message, Role};
pub use ollama::OllamaRouter;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::tools::ToolRegistry;

/// Routing verdict for a single query.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Hand the query to the named tool.
    Tool(String),
    /// The router answered the query itself.
    Direct(String),
}

/// Selects a tool (or answers directly) for each incoming query.
#[async_trait]
pub trait Router: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn select(
        &self,
        query: &str,
        history: &[Message],
        registry: &ToolRegistry,
    ) -> Result<Decision>;
}

pub fn create_router(config: &Config) -> Result<Box<dyn Router>> {
    match config.backend {
        Backend::Keyword => Ok(Box::new(KeywordRouter)),
        Backend::Ollama => Ok(Box::new(OllamaRouter::new(config))),
        Backend::Claude => Ok(Box::new(ClaudeRouter::new(config)?)),
    }
}

/// What a dispatch produced: the reply plus the tool that made it, if any.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub reply: String,
    pub tool: Option<String>,
}

/// The conversational agent: a router plus the fixed tool registry.
pub struct TutorAgent {
    router: Box<dyn Router>,
    registry: ToolRegistry,
}

impl TutorAgent {
    pub fn new(router: Box<dyn Router>, registry: ToolRegistry) -> Self {
        Self { router, registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn backend_name(&self) -> &'static str {
        self.router.backend_name()
    }

    /// Route a query and produce a reply. The history is read-only context
    /// for the router; this method never touches it.
    pub async fn dispatch(&self, query: &str, history: &[Message]) -> Result<DispatchOutcome> {
        match self.router.select(query, history, &self.registry).await? {
            Decision::Direct(reply) => Ok(DispatchOutcome { reply, tool: None }),
            Decision::Tool(name) => {
                // An LLM router may hallucinate a tool name; unknown names
                // fall through to the default tool.
                let tool = self
                    .registry
                    .get(&name)
                    .unwrap_or_else(|| self.registry.default_tool());
                tracing::debug!(tool = tool.name(), "routed query");
                Ok(DispatchOutcome {
                    reply: tool.invoke(query).await,
                    tool: Some(tool.name().to_string()),
                })
            }
        }
    }

    /// The default tool's reply, substituted when `dispatch` fails.
    pub async fn fallback(&self, query: &str) -> String {
        self.registry.default_tool().invoke(query).await
    }
}

/// System prompt instructing a model to answer with one registered tool name
/// on a single line, or with a direct answer when no tool fits.
fn routing_prompt(registry: &ToolRegistry) -> String {
    let mut prompt = String::from(
        "You are the dispatcher for a tutoring application. Pick the tool \
         best suited to the student's question and reply with exactly that \
         tool name on a single line, nothing else. If no tool fits, answer \
         the question directly instead.\nTools:\n",
    );
    for tool in registry.iter() {
        prompt.push_str(&format!("- {}: {}\n", tool.name(), tool.description()));
    }
    prompt
}

/// Interpret a routing reply: an exact tool name selects that tool, anything
/// else is treated as a direct answer.
fn parse_decision(reply: &str, registry: &ToolRegistry) -> Decision {
    let candidate = reply.trim().trim_matches('"');
    for tool in registry.iter() {
        if candidate.eq_ignore_ascii_case(tool.name()) {
            return Decision::Tool(tool.name().to_string());
        }
    }
    Decision::Direct(reply.trim().to_string())
}

/// Rough token estimate, ~4 characters per token.
fn estimate_tokens(text: &str) -> usize {
    (text.len() as f32 / 4.0).ceil() as usize
}

/// Trim history to roughly `budget` tokens, keeping the newest messages.
/// A zero budget means unbounded.
fn history_window(history: &[Message], budget: usize) -> &[Message] {
    if budget == 0 {
        return history;
    }
    let mut start = history.len();
    let mut used = 0;
    while start > 0 {
        let cost = estimate_tokens(&history[start - 1].content);
        if used + cost > budget {
            break;
        }
        used += cost;
        start -= 1;
    }
    &history[start..]
}
