//! Demo entry point.
//!
//! Composes the shell against the configured BFF, renders every tab to stdout
//! and selects the first post of the feed.
//!
//! ```bash
//! RUST_LOG=info cargo run -p feature-shell -- shell.toml
//! ```
//!
//! The config file argument is optional; environment overrides always apply.

use feature_shell::features::feed::FEED_ID;
use feature_shell::lifecycle::{AppShell, ShellConfig, ShellError};
use platform_kit::tracing::setup_tracing;
use std::process::ExitCode;
use tracing::{error, info, info_span, Instrument};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Shell failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ShellError> {
    let config = match std::env::args().nth(1) {
        Some(path) => ShellConfig::from_file(path)?,
        None => ShellConfig::default(),
    }
    .with_env_overrides()?;
    info!(base_url = %config.bff.base_url, self_user_id = config.self_user_id, "Starting shell");

    let shell = AppShell::new(&config)?;
    shell.launch();

    let mut first_post = None;
    for id in shell.features().ids() {
        let screen = shell
            .select_tab(id)?
            .render()
            .instrument(info_span!("render", tab = %id))
            .await?;
        if id == FEED_ID {
            first_post = screen.item_ids().first().copied();
        }
        println!("{screen}");
    }

    if let Some(post_id) = first_post {
        shell.select_tab(FEED_ID)?.select_item(post_id).await?;
        info!(post_id, "Selected first post");
    }

    info!("Demo complete");
    Ok(())
}
