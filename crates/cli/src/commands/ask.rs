//! `reactloop ask`: One plain completion without tools.

use reactloop_providers::{build_from_config, oneshot};

pub async fn run(message: String, system: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_with_key()?;
    let provider = build_from_config(&config)?;

    let reply = oneshot(provider.as_ref(), &system, &message, config.agent.temperature).await?;
    println!("{reply}");
    Ok(())
}
