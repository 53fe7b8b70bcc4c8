//! `reactloop run`: Solve a task with the reason-act-observe loop.

use std::path::PathBuf;
use std::sync::Arc;

use reactloop_agent::{AgentState, ReactAgent, RetryPolicy};
use reactloop_providers::build_from_config;
use reactloop_tools::{FileCatalog, default_registry, load_descriptors};
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub struct RunArgs {
    pub message: String,
    pub transcript: bool,
    pub max_iterations: Option<usize>,
    pub catalog: Option<PathBuf>,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_with_key()?;
    let provider = build_from_config(&config)?;

    let catalog_path = args
        .catalog
        .unwrap_or_else(|| config.tools.catalog_path.clone());
    let tools = Arc::new(default_registry());

    // The catalog is re-read every iteration; this early read only reports
    // mismatches with the registry up front.
    match load_descriptors(&catalog_path) {
        Ok(descriptors) => super::tools::warn_mismatches(&descriptors, &tools),
        Err(e) => warn!("{e}"),
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, canceling run");
            on_interrupt.cancel();
        }
    });

    let agent = ReactAgent::new(provider, Arc::new(FileCatalog::new(catalog_path)), tools)
        .with_system_prompt(config.agent.system_prompt.clone())
        .with_temperature(config.agent.temperature)
        .with_max_iterations(args.max_iterations.unwrap_or(config.agent.max_iterations))
        .with_retry_policy(RetryPolicy::fixed(
            config.agent.max_attempts,
            config.agent.retry_delay(),
        ))
        .with_cancellation(cancel);

    let mut state = AgentState::new(args.message);
    let outcome = agent.run(&mut state).await;

    if args.transcript {
        eprint!("{}", state.render_transcript());
    }

    let response = outcome?;
    println!("{}", response.observation);
    Ok(())
}
