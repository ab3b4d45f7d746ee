use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use atty::Stream;
use clap::Parser;
use qaamuus_api::{DictionaryApi, HttpDictionary};
use qaamuus_config::Config;
use qaamuus_core::{Action, Regions};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;
pub mod view;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "qaamuus", about = "Browse and search the Somali dictionary", version)]
struct Cli {
    /// Dictionary server, e.g. http://127.0.0.1:5002
    #[arg(long)]
    base_url: Option<String>,

    /// Entries per page (1-200)
    #[arg(long)]
    page_size: Option<u32>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turn off autocomplete
    #[arg(long)]
    no_suggest: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.network.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.paging.page_size = page_size;
    }
    if cli.no_suggest {
        config.suggest.enabled = false;
    }

    let api: Arc<dyn DictionaryApi> = Arc::new(HttpDictionary::new(config.network.clone())?);
    tracing::info!(
        "Browsing {} ({} entries per page)",
        config.network.base_url,
        config.paging.clamped_page_size()
    );
    let drain = Duration::from_secs(config.network.timeout_seconds);

    let state = Arc::new(AppState::new(config, Regions::standard()));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(api, atty::is(Stream::Stdout));
    controller.actions().send(Action::Start).await?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Input closed, waiting for pending fetches"),
                Ok(Err(e)) => tracing::error!("task exited: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
            // let in-flight responses print before exiting
            tokio::time::sleep(drain.min(Duration::from_secs(2))).await;
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("task ended with: {e}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(Stream::Stderr))
        .init();
}
