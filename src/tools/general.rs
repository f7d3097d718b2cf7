use async_trait::async_trait;

use super::{names, SubjectTool};

/// Catch-all helper. Also doubles as the fallback reply when agent dispatch
/// fails, so its output must never depend on anything that can break.
pub struct GeneralTool;

#[async_trait]
impl SubjectTool for GeneralTool {
    fn name(&self) -> &'static str {
        names::GENERAL
    }

    fn description(&self) -> &'static str {
        "Handles general questions outside chemistry and physics."
    }

    async fn invoke(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "Could you tell me a bit more about what you need help with?".to_string();
        }
        "I'm here to assist, but this seems unrelated to chemistry or physics. \
         Can you clarify what you'd like to learn?"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_query_gets_a_clarification() {
        let reply = GeneralTool.invoke("").await;
        assert!(!reply.is_empty());
        assert!(reply.ends_with('?'));
    }

    #[tokio::test]
    async fn off_topic_query_gets_redirected() {
        let reply = GeneralTool.invoke("What's for dinner tonight?").await;
        assert!(reply.contains("unrelated to chemistry or physics"));
    }
}
