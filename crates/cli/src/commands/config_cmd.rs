//! `reactloop config`: Show the configuration in effect.

use reactloop_config::AppConfig;

pub async fn run(default: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if config.api_key.is_some() {
        config.api_key = Some("***".into());
    }

    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    println!("{}", toml::to_string_pretty(&config)?);

    if config.api_key.is_none() {
        eprintln!("warning: no API key set; `run` and `ask` will refuse to start");
    }
    Ok(())
}
