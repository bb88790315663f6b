pub mod cli;
pub mod config;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod render;
pub mod web;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::io;
use std::sync::Arc;
use tracing::info;

use cli::{Cli, Command, TerminalPrompter, run_cli};
use config::Config;
use gateway::HostCompletionGateway;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let cfg = Config::from_env();
    info!(
        model = %cfg.model,
        model_base_url = %cfg.model_base_url,
        model_timeout_secs = cfg.model_timeout_secs,
        cli_max_tokens = ?cfg.cli_max_tokens,
        form_max_tokens = ?cfg.form_max_tokens,
        "loaded runtime configuration"
    );

    let client = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;
    let gateway = HostCompletionGateway::new(client, cfg.clone());

    match cli.command {
        Some(Command::Serve { bind }) => web::serve(Arc::new(gateway), cfg, bind).await,
        None => {
            run_cli(
                &gateway,
                &cfg,
                cli.ask,
                &mut TerminalPrompter,
                &mut io::stdout(),
            )
            .await
        }
    }
}
