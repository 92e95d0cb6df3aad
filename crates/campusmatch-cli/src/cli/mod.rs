//! CLI command definitions and shared helpers for the `cmatch` binary.
//!
//! Uses clap derive macros for argument parsing. Interactive commands
//! (`browse`, `chat`) keep the session token in memory for the life of
//! the process; one-shot commands log in on demand first.

pub mod auth;
pub mod browse;
pub mod chat;
pub mod matches;
pub mod profile;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

/// Find your match on campus.
#[derive(Parser)]
#[command(name = "cmatch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account.
    Register,

    /// Create or update your dating profile.
    Profile {
        /// Show the saved profile instead of editing it.
        #[arg(long)]
        show: bool,
    },

    /// Show the account you are logged in as.
    Whoami,

    /// List your ranked matches.
    #[command(alias = "ls")]
    Matches,

    /// Browse matches one card at a time.
    Browse,

    /// Open the chat with a user.
    Chat {
        /// Id of the user to chat with (shown on match cards).
        user_id: i64,
    },

    /// Generate shell completions.
    Completions { shell: Shell },
}

/// Spinner shown while a remote call is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}
