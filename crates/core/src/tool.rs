//! Tool trait: the abstraction over agent capabilities.
//!
//! Tools are what the agent dispatches `tool|args` acts to. Arguments arrive
//! as the raw text after the first `|`; each tool decides how to read them.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::{ParameterDescriptor, ToolDescriptor};
use crate::error::ToolError;

/// The core Tool trait.
///
/// Each tool (calculator, search, weather, ...) implements this trait and is
/// registered in the [`ToolRegistry`] handed to the agent loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculator").
    fn name(&self) -> &str;

    /// A description of what this tool does (shown to the model).
    fn description(&self) -> &str;

    /// The parameters this tool reads from its argument text.
    fn parameters(&self) -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    /// Execute the tool with the raw argument text.
    async fn execute(&self, args: &str) -> Result<String, ToolError>;

    /// Describe this tool for a catalog.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description(), self.parameters())
    }
}

/// A registry of available tools, keyed by name.
///
/// Supplied by the caller. It is not derived from the catalog the model is
/// shown; keeping the two consistent is the integrator's job (see
/// [`unadvertised_tools`]).
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            debug!(tool = %name, "Replaced registered tool");
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: &str) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(args).await
    }

    /// List all registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Descriptors of all registered tools, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> =
            self.tools.values().map(|t| t.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of registered tools that a catalog does not advertise.
///
/// The agent loop never runs this check; callers that want the catalog and
/// the registry to agree can use it at startup.
pub fn unadvertised_tools(advertised: &[ToolDescriptor], registry: &ToolRegistry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .filter(|name| !advertised.iter().any(|d| d.name == *name))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        fn parameters(&self) -> Vec<ParameterDescriptor> {
            vec![ParameterDescriptor::required("text", "string", "Text to echo")]
        }
        async fn execute(&self, args: &str) -> Result<String, ToolError> {
            if args.is_empty() {
                return Err(ToolError::InvalidArguments("nothing to echo".into()));
            }
            Ok(args.to_string())
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert!(registry.contains("echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_descriptors() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let defs = registry.descriptors();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "echo");
        assert!(defs[0].parameters[0].required);
    }

    #[tokio::test]
    async fn registry_execute_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let result = registry.execute("echo", "hello world").await.unwrap();
        assert_eq!(result, "hello world");

        let err = registry.execute("echo", "").await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn registry_execute_missing_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nonexistent", "x").await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn unadvertised_tools_lists_registry_only_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        assert_eq!(unadvertised_tools(&[], &registry), vec!["echo".to_string()]);
        let advertised = vec![ToolDescriptor::new("echo", "Echoes", vec![])];
        assert!(unadvertised_tools(&advertised, &registry).is_empty());
    }
}
