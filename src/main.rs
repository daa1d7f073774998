// Copyright 2025 The Views JSON:API Server Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use views_jsonapi_server::{load_config_file, save_config_file, ServerConfig, ViewsJsonApiServer};

#[derive(Parser)]
#[command(name = "views-jsonapi-server")]
#[command(about = "Standalone server exposing configured views as read-only JSON:API endpoints")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run {
        /// Path to the configuration file
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,

        /// Override the server port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate a configuration file without starting the server
    Validate {
        /// Path to the configuration file to validate
        #[arg(short, long, default_value = "config/server.yaml")]
        config: PathBuf,

        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { config, port }) => run_server(config, port).await,
        Some(Commands::Validate {
            config,
            show_resolved,
        }) => validate_config(config, show_resolved),
        None => {
            // Default behavior: run the server
            run_server(cli.config, cli.port).await
        }
    }
}

fn init_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // Ignore re-initialization; the first init wins.
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run the server
async fn run_server(config_path: PathBuf, port_override: Option<u16>) -> Result<()> {
    // Load .env from the config directory if present (feeds ${...}
    // interpolation in the config file).
    if let Some(config_dir) = config_path.parent() {
        let env_file = config_dir.join(".env");
        if env_file.exists() {
            if let Err(e) = dotenvy::from_path(&env_file) {
                eprintln!("Warning: Failed to load .env file: {e}");
            }
        }
    }

    // Create a default config file when none exists yet.
    if !config_path.exists() {
        init_logging("info");

        warn!(
            "Config file '{}' not found. Creating default configuration.",
            config_path.display()
        );

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut default_config = ServerConfig::default();
        if let Some(port) = port_override {
            default_config.server.port = port;
            info!("Using command line port {port} in default configuration");
        }

        save_config_file(&default_config, &config_path)?;

        info!(
            "Default configuration created at: {}",
            config_path.display()
        );
        info!("Please edit the configuration file to add views, datasets, and resources.");
    }

    // Load once for the log level, then hand the path to the server.
    let config = load_config_file(&config_path)?;
    init_logging(&config.server.log_level);

    let server = ViewsJsonApiServer::new(config_path, port_override)?;
    server.run().await
}

/// Validate a configuration file and print a summary
fn validate_config(config_path: PathBuf, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());

    let config = load_config_file(&config_path)?;

    println!("Configuration is valid.");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Resources: {}", config.resources.len());
    for resource in &config.resources {
        println!(
            "    {} -> /jsonapi/{} (view: {}, display: {})",
            resource.id,
            resource.normalized_path(),
            resource.view_id,
            resource.display_id
        );
    }
    println!("  Views: {}", config.views.len());
    println!("  Datasets: {}", config.datasets.len());
    println!("  Resource types: {}", config.resource_types.len());

    if show_resolved {
        println!("\nResolved configuration:");
        println!("{}", serde_yaml::to_string(&config)?);
    }

    Ok(())
}
