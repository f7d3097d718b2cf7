mod chemistry;
mod general;
mod physics;
mod web_search;

pub use chemistry::ChemistryTool;
pub use general::GeneralTool;
pub use physics::PhysicsTool;
pub use web_search::WebSearchTool;

use async_trait::async_trait;

/// Canonical tool names, shared by the registry and the routers.
pub mod names {
    pub const CHEMISTRY: &str = "Chemistry Tutor";
    pub const PHYSICS: &str = "Physics Tutor";
    pub const WEB_SEARCH: &str = "Web Search";
    pub const GENERAL: &str = "General Helper";
}

/// A subject tool maps a free-text query to a reply string.
///
/// Tools are infallible: an empty query gets a clarification prompt and
/// internal failures are folded into the returned text.
#[async_trait]
pub trait SubjectTool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn invoke(&self, query: &str) -> String;
}

/// The fixed set of tools a router can select from. Built once at startup,
/// never mutated afterwards.
pub struct ToolRegistry {
    tools: Vec<Box<dyn SubjectTool>>,
    default_index: usize,
}

impl ToolRegistry {
    /// The standard four-tool set: chemistry, physics, web search, and the
    /// general helper as the default.
    pub fn standard(search: WebSearchTool) -> Self {
        let tools: Vec<Box<dyn SubjectTool>> = vec![
            Box::new(ChemistryTool),
            Box::new(PhysicsTool),
            Box::new(search),
            Box::new(GeneralTool),
        ];
        let default_index = tools.len() - 1;
        Self {
            tools,
            default_index,
        }
    }

    /// Look a tool up by its registered name.
    pub fn get(&self, name: &str) -> Option<&dyn SubjectTool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// The tool that answers when nothing else fits or dispatch fails.
    pub fn default_tool(&self) -> &dyn SubjectTool {
        self.tools[self.default_index].as_ref()
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SubjectTool> {
        self.tools.iter().map(|tool| tool.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn registry() -> ToolRegistry {
        ToolRegistry::standard(WebSearchTool::new(3, Duration::from_secs(1)))
    }

    #[test]
    fn standard_registry_has_four_tools_with_general_as_default() {
        let registry = registry();
        assert_eq!(registry.iter().count(), 4);
        assert_eq!(registry.default_tool().name(), names::GENERAL);
        for name in [
            names::CHEMISTRY,
            names::PHYSICS,
            names::WEB_SEARCH,
            names::GENERAL,
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        assert!(registry().get("Math Tutor").is_none());
    }

    #[tokio::test]
    async fn every_tool_answers_an_empty_query_with_a_clarification() {
        let registry = registry();
        for tool in registry.iter() {
            let reply = tool.invoke("").await;
            assert!(
                !reply.trim().is_empty(),
                "{} returned an empty reply",
                tool.name()
            );
            let reply = tool.invoke("   ").await;
            assert!(!reply.trim().is_empty());
        }
    }
}
