//! `reactloop tools`: Show what the model will be told about tools.

use std::path::PathBuf;

use reactloop_config::AppConfig;
use reactloop_core::catalog::{ToolDescriptor, render_tools};
use reactloop_core::tool::{ToolRegistry, unadvertised_tools};
use reactloop_tools::{default_registry, load_descriptors, to_catalog_json};
use tracing::warn;

pub async fn run(catalog: Option<PathBuf>, export: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = default_registry();

    if export {
        let json = to_catalog_json(&registry.descriptors());
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    let path = match catalog {
        Some(path) => path,
        None => {
            let config =
                AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
            config.tools.catalog_path
        }
    };

    let descriptors = load_descriptors(&path)?;
    println!("{}", render_tools(&descriptors));
    warn_mismatches(&descriptors, &registry);
    Ok(())
}

/// Report tools the model cannot see and advertised tools nothing can run.
pub fn warn_mismatches(advertised: &[ToolDescriptor], registry: &ToolRegistry) {
    for name in unadvertised_tools(advertised, registry) {
        warn!(tool = %name, "Registered tool is missing from the catalog");
    }
    for descriptor in advertised {
        if !registry.contains(&descriptor.name) {
            warn!(tool = %descriptor.name, "Catalog lists a tool that is not registered");
        }
    }
}
