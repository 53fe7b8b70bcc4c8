//! Tool catalog: the model-readable listing of available tools.
//!
//! A catalog turns [`ToolDescriptor`]s into the text block placed in the
//! system prompt. Where the descriptors come from (a JSON file, the registry
//! itself) is up to the implementation.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Separator placed between rendered tools.
pub const TOOL_SEPARATOR: &str = "\n---\n";

/// One parameter a tool reads from its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    /// JSON type name ("string", "number", ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParameterDescriptor {
    pub fn required(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// Metadata describing one tool to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// Ordered by parameter name.
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl ToolDescriptor {
    /// Create a descriptor. Parameters are sorted by name so rendering does
    /// not depend on the order they were supplied in.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        mut parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        parameters.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Render this tool for inclusion in a system prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Tool: {}\n", self.name));
        out.push_str(&format!("Description: {}\n", self.description));

        if !self.parameters.is_empty() {
            out.push_str("Parameters:\n");
            for param in &self.parameters {
                let flag = if param.required { "required" } else { "optional" };
                out.push_str(&format!("  - {}: {} ({})\n", param.name, param.kind, flag));
                if !param.description.is_empty() {
                    out.push_str(&format!("    {}\n", param.description));
                }
            }
        }

        out
    }
}

/// Render a list of tools, separated by [`TOOL_SEPARATOR`].
pub fn render_tools(descriptors: &[ToolDescriptor]) -> String {
    descriptors
        .iter()
        .map(ToolDescriptor::render)
        .collect::<Vec<_>>()
        .join(TOOL_SEPARATOR)
}

/// A source of the tool listing shown to the model.
///
/// A failure here is fatal for the iteration asking for it: the model cannot
/// be prompted without knowing its tools.
pub trait ToolCatalog: Send + Sync {
    /// Render every available tool for the system prompt.
    fn describe_tools(&self) -> Result<String, CatalogError>;
}
