#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Conflict dashboard API server.
//!
//! ```text
//! conflict_dash_server [--config dashboard.toml] [--bind 0.0.0.0] [--port 8080]
//! ```
//!
//! Without `--config` the embedded configuration is used. `--bind` and
//! `--port` fall back to `BIND_ADDR` and `PORT`, then to `127.0.0.1:8080`.

use std::path::PathBuf;

use clap::Parser;
use conflict_dash_config::DashboardConfig;
use conflict_dash_dataset::Dataset;
use conflict_dash_server::{AppState, run_server};

#[derive(Parser)]
#[command(
    name = "conflict_dash_server",
    about = "Serve the conflict dashboard API"
)]
struct Cli {
    /// Dashboard configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to bind
    #[arg(long)]
    bind: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

fn load_state(config_path: Option<&PathBuf>) -> Result<AppState, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::embedded()?,
    };
    let dataset = Dataset::load(&config.data)?;
    Ok(AppState::new(dataset, config))
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let state = match load_state(cli.config.as_ref()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to load dashboard data: {e}");
            return Err(e);
        }
    };

    let bind_addr = cli
        .bind
        .or_else(|| std::env::var("BIND_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8080);

    run_server(state, &bind_addr, port).await?;
    Ok(())
}
