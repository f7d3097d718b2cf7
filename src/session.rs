use chrono::Local;
use uuid::Uuid;

use crate::agent::{Message, TutorAgent};

/// What one interaction produced, for callers that annotate their display.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub reply: String,
    pub routed_tool: Option<String>,
    pub fell_back: bool,
}

/// A single tutoring session: the transcript, the diagnostic log, and the
/// agent that answers queries. Transcript and log are append-only and die
/// with the session; nothing is persisted.
pub struct Session {
    id: Uuid,
    agent: TutorAgent,
    transcript: Vec<Message>,
    log: Vec<String>,
}

impl Session {
    pub fn new(agent: TutorAgent) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent,
            transcript: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn agent(&self) -> &TutorAgent {
        &self.agent
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn log_line(&mut self, text: String) {
        self.log
            .push(format!("[{}] {}", Local::now().format("%H:%M:%S"), text));
    }

    /// Process one query. Exactly one user message and one assistant message
    /// are appended, in that order, whatever the agent does: a dispatch
    /// failure is logged and masked with the default tool's reply.
    pub async fn process(&mut self, query: &str) -> ProcessOutcome {
        self.transcript.push(Message::user(query));
        let history_end = self.transcript.len() - 1;

        let dispatched = {
            let history = &self.transcript[..history_end];
            self.agent.dispatch(query, history).await
        };

        let outcome = match dispatched {
            Ok(dispatched) => {
                let via = dispatched
                    .tool
                    .clone()
                    .unwrap_or_else(|| "direct answer".to_string());
                self.log_line(format!("processed query via {via}"));
                ProcessOutcome {
                    reply: dispatched.reply,
                    routed_tool: dispatched.tool,
                    fell_back: false,
                }
            }
            Err(err) => {
                tracing::warn!("agent dispatch failed: {err:#}");
                let reply = self.agent.fallback(query).await;
                let default_name = self.agent.registry().default_tool().name().to_string();
                self.log_line(format!(
                    "dispatch failed ({err:#}); falling back to {default_name}"
                ));
                ProcessOutcome {
                    reply,
                    routed_tool: Some(default_name),
                    fell_back: true,
                }
            }
        };

        self.transcript.push(Message::assistant(outcome.reply.clone()));
        outcome
    }
}
