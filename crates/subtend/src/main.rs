//! subtend: reconcile host registration against a Katello/Satellite server

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use subtend_core::{Ensure, Reconciler};
use subtend_exec::LocalRunner;
use subtend_facts::{JsonFactCache, StatusReader};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "subtend")]
#[command(about = "Reconcile host registration against an entitlement server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one convergence pass
    Apply,
    /// Show the registration discovered on this host
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which desired fields differ from the observed registration
    Diff,
}

fn build_reconciler(config: &Config) -> Reconciler {
    let runner = Arc::new(LocalRunner::new());

    let cache = match JsonFactCache::load(&config.client.facts_path) {
        Ok(cache) => cache,
        Err(e) => {
            warn!(error = %e, "facts unavailable, proceeding without them");
            JsonFactCache::empty()
        }
    };

    let reader = StatusReader::new(runner.clone(), Arc::new(cache), &config.client.program);
    Reconciler::new(runner, reader).with_program(&config.client.program)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.client.log_level)),
        )
        .init();

    let reconciler = build_reconciler(&config);

    match cli.command {
        Commands::Apply => {
            let report = reconciler.flush(&config.registration).await?;
            if report.is_noop() {
                info!("nothing to do");
            } else {
                info!(
                    actions = ?report.actions,
                    tolerated_failures = report.tolerated_failures,
                    "pass completed"
                );
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Status { json } => {
            let instance = reconciler.instances().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&instance)?);
            } else {
                match instance {
                    Some(status) => println!("{status}"),
                    None => println!("no registration discovered"),
                }
            }
        }
        Commands::Diff => {
            let desired = &config.registration;
            let mut observed = desired.clone();
            match reconciler.instances().await {
                Some(status) => {
                    observed.name = status.server().unwrap_or_default().to_string();
                    observed.ensure = if status.is_registered() {
                        Ensure::Present
                    } else {
                        Ensure::Absent
                    };
                }
                None => {
                    observed.name = String::new();
                    observed.ensure = Ensure::Absent;
                }
            }

            let changed = observed.diff(desired);
            if changed.is_empty() {
                println!("in sync");
            } else {
                for field in changed {
                    println!("{field}");
                }
            }
        }
    }

    Ok(())
}
