//! CampusMatch terminal client entry point.
//!
//! Binary name: `cmatch`
//!
//! Parses CLI arguments, initializes logging and application state, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use campusmatch_types::user::UserId;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,campusmatch=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cmatch", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    match cli.command {
        Commands::Register => cli::auth::register(&state, cli.json).await?,

        Commands::Profile { show } => {
            if show {
                cli::profile::show_profile(&state, cli.json).await?;
            } else {
                cli::profile::edit_profile(&state, cli.json).await?;
            }
        }

        Commands::Whoami => cli::auth::whoami(&state, cli.json).await?,

        Commands::Matches => cli::matches::list_matches(&state, cli.json).await?,

        Commands::Browse => cli::browse::browse(&state).await?,

        Commands::Chat { user_id } => cli::chat::chat_with(&state, UserId::new(user_id)).await?,

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
