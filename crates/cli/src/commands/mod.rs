pub mod ask;
pub mod config_cmd;
pub mod run;
pub mod tools;

use reactloop_config::AppConfig;

/// Load the configuration, failing with setup instructions when no API
/// key is available.
pub fn load_with_key() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if config.require_api_key().is_err() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables (or put it in .env):");
        for var in reactloop_config::API_KEY_VARS {
            eprintln!("    {var}");
        }
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    Ok(config)
}
