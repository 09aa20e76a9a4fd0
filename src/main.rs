mod auth;
mod cli;
mod collector;
mod config;
mod error;
mod insights;
mod metrics;
mod models;
mod providers;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ci-stability");
    cli.execute().await?;

    Ok(())
}
