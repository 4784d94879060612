//! Route table inspection CLI.
//!
//! ```text
//! hierarchical-router --config routes.toml resolve svc.payments.v2.beta
//! hierarchical-router --config routes.toml dump
//! hierarchical-router --config routes.toml check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hierarchical_router::config::load_config;
use hierarchical_router::observability::logging;
use hierarchical_router::Router;

#[derive(Parser)]
#[command(name = "hierarchical-router")]
#[command(about = "Resolve hierarchical routing keys against a route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the target each key resolves to
    Resolve {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the route tree as JSON
    Dump,
    /// Validate the route table and report duplicate keys
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    logging::init(&config.observability)?;

    tracing::info!(
        path = %cli.config.display(),
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let (router, report) = Router::from_config(&config)?;

    match cli.command {
        Commands::Resolve { keys } => {
            let mut failed = false;
            for key in keys {
                match router.resolve(&key) {
                    Ok(Some(target)) => println!("{} -> {}", key, target),
                    Ok(None) => println!("{} -> <no route>", key),
                    Err(e) => {
                        eprintln!("{}: {}", key, e);
                        failed = true;
                    }
                }
            }
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Dump => {
            println!("{}", serde_json::to_string_pretty(&router.snapshot())?);
        }
        Commands::Check => {
            println!(
                "{} routes registered, {} conflicts",
                report.inserted,
                report.conflicts.len()
            );
            for key in &report.conflicts {
                println!("  duplicate key: {}", key);
            }
            if report.has_conflicts() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
