//! Tool catalog sources.
//!
//! The on-disk format is the OpenAI function-tool array:
//!
//! ```json
//! [{"type": "function",
//!   "function": {"name": "calculator", "description": "...",
//!                "parameters": {"type": "object",
//!                               "properties": {"expression": {"type": "string", "description": "..."}},
//!                               "required": ["expression"]}}}]
//! ```

use reactloop_core::catalog::{ParameterDescriptor, ToolCatalog, ToolDescriptor, render_tools};
use reactloop_core::error::CatalogError;
use reactloop_core::tool::ToolRegistry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    function: FunctionSpec,
}

#[derive(Debug, Deserialize)]
struct FunctionSpec {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: ParametersSpec,
}

#[derive(Debug, Default, Deserialize)]
struct ParametersSpec {
    #[serde(default)]
    properties: BTreeMap<String, PropertySpec>,
    #[serde(default)]
    required: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PropertySpec {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    description: String,
}

impl From<CatalogEntry> for ToolDescriptor {
    fn from(entry: CatalogEntry) -> Self {
        let FunctionSpec {
            name,
            description,
            parameters,
        } = entry.function;

        let params = parameters
            .properties
            .into_iter()
            .map(|(param_name, prop)| ParameterDescriptor {
                required: parameters.required.contains(&param_name),
                name: param_name,
                kind: prop.kind,
                description: prop.description,
            })
            .collect();

        ToolDescriptor::new(name, description, params)
    }
}

/// Parse a catalog document already held in memory. `origin` is only used
/// in error messages.
pub fn parse_descriptors(json: &str, origin: &Path) -> Result<Vec<ToolDescriptor>, CatalogError> {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(entries.into_iter().map(ToolDescriptor::from).collect())
}

/// Read and parse a catalog file.
pub fn load_descriptors(path: &Path) -> Result<Vec<ToolDescriptor>, CatalogError> {
    let data = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_descriptors(&data, path)
}

/// Write descriptors back out in the catalog file format.
pub fn to_catalog_json(descriptors: &[ToolDescriptor]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = descriptors
        .iter()
        .map(|d| {
            let properties: serde_json::Map<String, serde_json::Value> = d
                .parameters
                .iter()
                .map(|p| {
                    (
                        p.name.clone(),
                        serde_json::json!({"type": p.kind, "description": p.description}),
                    )
                })
                .collect();
            let required: Vec<&str> = d
                .parameters
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect();

            serde_json::json!({
                "type": "function",
                "function": {
                    "name": d.name,
                    "description": d.description,
                    "parameters": {
                        "type": "object",
                        "properties": properties,
                        "required": required,
                    }
                }
            })
        })
        .collect();
    serde_json::Value::Array(entries)
}

/// A catalog backed by a JSON file, re-read on every call so edits are
/// picked up by the next iteration.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolCatalog for FileCatalog {
    fn describe_tools(&self) -> Result<String, CatalogError> {
        let descriptors = load_descriptors(&self.path)?;
        debug!(path = %self.path.display(), tools = descriptors.len(), "Loaded tool catalog");
        Ok(render_tools(&descriptors))
    }
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    descriptors: Vec<ToolDescriptor>,
}

impl StaticCatalog {
    pub fn new(descriptors: Vec<ToolDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Advertise exactly what a registry can execute.
    pub fn from_registry(registry: &ToolRegistry) -> Self {
        Self::new(registry.descriptors())
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }
}

impl ToolCatalog for StaticCatalog {
    fn describe_tools(&self) -> Result<String, CatalogError> {
        Ok(render_tools(&self.descriptors))
    }
}
