//! Tool catalog and built-in tool implementations for reactloop.
//!
//! The catalog side reads the JSON tool listing shown to the model; the
//! tools side provides the capabilities the agent actually dispatches to.
//! The built-in tools are deterministic stand-ins (no network access) so the
//! loop can be exercised end to end.

pub mod calculator;
pub mod catalog;
pub mod search;
pub mod weather;

use reactloop_core::tool::ToolRegistry;

pub use catalog::{FileCatalog, StaticCatalog, load_descriptors, parse_descriptors, to_catalog_json};

/// Create a tool registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(calculator::CalculatorTool));
    registry.register(Box::new(search::SearchTool));
    registry.register(Box::new(weather::WeatherTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_builtin_tools() {
        let registry = default_registry();
        assert_eq!(registry.names(), vec!["calculator", "search", "weather"]);
    }
}
