//! dashboard - A terminal dashboard of system gauges and remote tasks.
//!
//! This is the main binary: it resolves configuration, starts file logging
//! and launches the TUI application.

mod cli;
mod logging;

use anyhow::Context;
use clap::Parser;
use dashboard_tasks::TaskClient;
use dashboard_tui::{App, Dashboard, terminal};
use tracing::info;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    logging::init(&config.log)?;
    info!(
        api = %config.api.base_url,
        interval_secs = config.sampling.interval_secs,
        "configuration loaded"
    );

    let client = TaskClient::new(&config.api.base_url, config.api.timeout())
        .context("failed to create task client")?;
    let dashboard = Dashboard::standard(client, config.sampling.interval())
        .context("failed to build dashboard layout")?;
    let mut app = App::new(dashboard);

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
