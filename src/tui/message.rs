use crate::session::ProcessOutcome;

/// Role of a rendered transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One rendered transcript entry, annotated with the tool that answered.
#[derive(Debug, Clone, PartialEq)]
pub struct UiMessage {
    pub role: MessageRole,
    pub content: String,
    pub routed_tool: Option<String>,
    pub fell_back: bool,
}

impl UiMessage {
    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
            routed_tool: None,
            fell_back: false,
        }
    }

    pub fn assistant(outcome: &ProcessOutcome) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: outcome.reply.clone(),
            routed_tool: outcome.routed_tool.clone(),
            fell_back: outcome.fell_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_entries_carry_the_routing_annotation() {
        let outcome = ProcessOutcome {
            reply: "F = ma".to_string(),
            routed_tool: Some("Physics Tutor".to_string()),
            fell_back: false,
        };
        let message = UiMessage::assistant(&outcome);
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, "F = ma");
        assert_eq!(message.routed_tool.as_deref(), Some("Physics Tutor"));
    }
}
