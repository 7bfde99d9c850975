use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*};
use markets::{Config, Dashboard, Fetcher, HistorySource, Trigger, View};
use markets_client::prelude::build_client;
use std::sync::Arc;
use ui::Action;

mod cli;
mod ui;

const USER_AGENT: &str = concat!("markets/", env!("CARGO_PKG_VERSION"));

fn preprocess(level: log::LevelFilter) {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.log_level.into());
    log::info!("Command line input recorded: {cli:#?}");

    let config = Arc::new(Config::load(cli.config.as_deref()).await?);
    let client = build_client(USER_AGENT)?;
    let board = Dashboard::new(config.clone(), Fetcher::new(client, &config));

    // e.g., the missing API key notice
    let status = board.snapshot().await.status;
    if !status.is_empty() {
        ui::print_status(&status);
    }

    // cli framework:
    // "> markets <COMMAND>"
    match cli.command {
        // "> markets show [--view sectors|factors]"
        Show { view } => refresh(&board, view.into(), Trigger::Startup).await?,

        // "> markets watch [--view sectors|factors]"
        Watch { view } => {
            let mut view: View = view.into();
            refresh(&board, view, Trigger::Startup).await?;
            loop {
                match ui::prompt(view).await? {
                    Action::Refresh => refresh(&board, view, Trigger::Manual).await?,
                    Action::Switch => {
                        view = view.other();
                        refresh(&board, view, Trigger::ViewChanged).await?;
                    }
                    Action::Quit => break,
                }
            }
        }
    }

    Ok(())
}

async fn refresh<S: HistorySource>(board: &Dashboard<S>, view: View, trigger: Trigger) -> Result<()> {
    let pb = ui::spinner(format!("Fetching {view}"))?;
    let applied = board.refresh(view, trigger).await;
    pb.finish_and_clear();

    log::info!("Refresh of {view} ({trigger:?}): {applied:?}");
    ui::print_snapshot(&board.snapshot().await);
    Ok(())
}
