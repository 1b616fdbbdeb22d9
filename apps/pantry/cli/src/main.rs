//! Pantry CLI
//!
//! Terminal client for the items API: one-shot commands or an interactive
//! shell. Talks to the Items Service directly or through the gateway.

use clap::Parser;
use core_config::tracing::{init_cli_tracing, install_color_eyre};
use eyre::Result;

mod client;
mod commands;
mod config;
mod shell;
mod view;

use client::{HttpItemsClient, ItemDraft, ItemsApi};
use commands::{Cli, Commands};
use view::ItemsView;

/// Print the view and turn a recorded error into a failing exit status.
fn finish(view: &ItemsView) -> Result<()> {
    print!("{}", view.render());
    match view.last_error() {
        Some(error) => Err(eyre::eyre!("{}", error)),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_cli_tracing();

    let cli = Cli::parse();
    let base_url = config::resolve_base_url(cli.base_url);
    tracing::debug!(%base_url, "Using items API");

    let api = HttpItemsClient::new(base_url)?;
    let mut view = ItemsView::new();

    match cli.command {
        Commands::List => {
            view.refresh(&api).await;
        }
        Commands::Add(args) => {
            view.refresh(&api).await;
            view.add(&api, ItemDraft::from(args)).await;
        }
        Commands::Edit { id, fields } => {
            view.refresh(&api).await;
            view.edit(&api, &id, ItemDraft::from(fields)).await;
        }
        Commands::Toggle { id } => {
            view.refresh(&api).await;
            view.toggle(&api, &id).await;
        }
        Commands::Delete { id } => {
            view.refresh(&api).await;
            view.delete(&api, &id).await;
        }
        Commands::Health => {
            let health = api.health().await?;
            println!("{} {} ({})", health.name, health.version, health.status);
            return Ok(());
        }
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&api, stdin, tokio::io::stdout()).await?;
            return Ok(());
        }
    }

    finish(&view)
}
