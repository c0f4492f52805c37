// src/main.rs — tweetforge entry point

use clap::Parser;

use tweetforge::api::{self, ApiState};
use tweetforge::cli::{Cli, Commands};
use tweetforge::core::engine::RefineEngine;
use tweetforge::infra::config::Config;
use tweetforge::infra::logger;
use tweetforge::provider::resolver;
use tweetforge::provider::roles::ModelRoles;
use tweetforge::provider::ModelRef;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let (provider, default_model) = resolver::discover_provider()?;

    // Model precedence: -m flag > per-role config > provider default
    let default_model = match cli.model.as_deref() {
        Some(s) => ModelRef::parse(s)
            .ok_or_else(|| anyhow::anyhow!("model must be in provider/model form, got '{s}'"))?,
        None => default_model,
    };
    let roles = ModelRoles::from_config(
        default_model,
        config.models.generator.as_deref(),
        config.models.evaluator.as_deref(),
        config.models.reviser.as_deref(),
    );

    match cli.command {
        Commands::Serve { port } => {
            let state = ApiState {
                provider,
                roles,
                default_max_iteration: config.iteration.default_max_iteration,
            };
            api::start_server(port.unwrap_or(config.server.port), state).await
        }
        Commands::Generate {
            topic,
            max_iteration,
        } => {
            let cap = max_iteration.unwrap_or(config.iteration.default_max_iteration);
            let engine = RefineEngine::new(provider, roles);
            let result = engine.run(&topic, cap).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}
