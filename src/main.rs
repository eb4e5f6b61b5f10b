mod app;
mod classifier;
mod config;
mod controller;
mod domain;
mod infrastructure;
mod render;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = app::Cli::parse();
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let app = app::PhishGuardApp::initialize(config)?;
    match cli.url {
        Some(url) => app.check_once(&url, cli.json).await,
        None => app.run().await,
    }
}
