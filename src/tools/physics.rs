use async_trait::async_trait;

use super::{names, SubjectTool};

const GUIDING_QUESTIONS: [&str; 3] = [
    "Which topic in physics is troubling you?",
    "What equations or concepts might apply here?",
    "What are the known and unknown variables in the problem?",
];

/// Socratic physics tutor, same shape as the chemistry tool.
pub struct PhysicsTool;

#[async_trait]
impl SubjectTool for PhysicsTool {
    fn name(&self) -> &'static str {
        names::PHYSICS
    }

    fn description(&self) -> &'static str {
        "Helps with physics problems."
    }

    async fn invoke(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "Ask me a physics question and we can figure it out together.".to_string();
        }
        format!("{} Let's figure it out!", GUIDING_QUESTIONS[0])
    }
}
