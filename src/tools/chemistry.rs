use async_trait::async_trait;

use super::{names, SubjectTool};

// The opening move is always the first question; the rest are follow-ups a
// future revision could rotate through.
const GUIDING_QUESTIONS: [&str; 3] = [
    "What concept in chemistry are you working on?",
    "Can you identify the variables or data in the problem?",
    "What formula or principle applies to this scenario?",
];

/// Socratic chemistry tutor: replies with a guiding question rather than an
/// answer.
pub struct ChemistryTool;

#[async_trait]
impl SubjectTool for ChemistryTool {
    fn name(&self) -> &'static str {
        names::CHEMISTRY
    }

    fn description(&self) -> &'static str {
        "Helps with chemistry problems."
    }

    async fn invoke(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "Ask me a chemistry question and we can work through it together.".to_string();
        }
        format!("{} Let's work on it together!", GUIDING_QUESTIONS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_query_gets_a_clarification() {
        let reply = ChemistryTool.invoke("").await;
        assert!(reply.contains("chemistry"));
    }

    #[tokio::test]
    async fn a_question_gets_the_opening_guiding_question() {
        let reply = ChemistryTool.invoke("How do I balance this equation?").await;
        assert!(reply.starts_with(GUIDING_QUESTIONS[0]));
        assert!(reply.ends_with("Let's work on it together!"));
    }
}
