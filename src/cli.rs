use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::collector::Collector;
use crate::config::{Settings, DEFAULT_CONFIG_PATH};
use crate::server::{self, ServerState};

#[derive(Parser)]
#[command(name = "ci-stability")]
#[command(author, version, about = "Release stability metrics for Jenkins", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the YAML configuration file
    #[arg(short, long, global = true, env = "CI_STABILITY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Compute day and month boundaries in UTC instead of local time
    #[arg(long, global = true, default_value_t = false)]
    utc: bool,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect one snapshot and print it as JSON
    Snapshot,

    /// Serve snapshots over HTTP at /metrics
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Snapshot => {
                let settings = Settings::load(&self.config)
                    .with_context(|| format!("Loading {}", self.config.display()))?;
                info!(
                    "Collecting release stability for {} instances",
                    settings.instances.len()
                );

                let collector = Collector::new(settings);
                let snapshot = if self.utc {
                    collector.collect(&Utc::now()).await?
                } else {
                    collector.collect(&Local::now()).await?
                };

                let json_output = if self.pretty {
                    serde_json::to_string_pretty(&snapshot)?
                } else {
                    serde_json::to_string(&snapshot)?
                };

                if let Some(output_path) = &self.output {
                    std::fs::write(output_path, json_output)?;
                    info!("Snapshot written to: {}", output_path.display());
                } else {
                    println!("{}", json_output);
                }

                Ok(())
            }
            Commands::Serve { bind } => {
                // Fail at startup on a broken config; later edits are picked up per request.
                Settings::load(&self.config)
                    .with_context(|| format!("Loading {}", self.config.display()))?;

                let state = ServerState::new(self.config.clone(), self.utc);
                server::serve(*bind, state).await?;

                Ok(())
            }
        }
    }
}
