use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::HttpRoomsApi;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod config;

use app::Viewer;
use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Browse chat rooms and their messages from a rooms API")]
struct Args {
    /// Base URL of the rooms API; overrides config file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Config file to read instead of ./viewer.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the room list once and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let api = HttpRoomsApi::new(&settings.api_url)
        .with_context(|| format!("unusable api url '{}'", settings.api_url))?;
    info!(api_url = %api.base_url(), "starting room viewer");

    let mut viewer = Viewer::new(Arc::new(api), io::stdout());
    viewer.start().await?;
    if args.once {
        return Ok(());
    }

    viewer.run(BufReader::new(tokio::io::stdin())).await
}
