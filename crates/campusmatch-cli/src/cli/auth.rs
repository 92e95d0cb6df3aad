//! Registration, login-on-demand, and whoami.

use console::style;
use dialoguer::{Input, Password};

use campusmatch_types::auth::RegisterRequest;
use campusmatch_types::error::ApiError;

use crate::state::AppState;

use super::spinner;

/// Interactive account creation.
pub async fn register(state: &AppState, json: bool) -> anyhow::Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    let full_name: String = Input::new().with_prompt("Full name").interact_text()?;

    let bar = spinner("registering...");
    let result = state
        .client
        .register(&RegisterRequest {
            email,
            password,
            full_name,
        })
        .await;
    bar.finish_and_clear();

    let account = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        println!();
        println!(
            "  {} Registered {} -- run an authenticated command to log in.",
            style("✓").green(),
            style(&account.email).cyan()
        );
        println!();
    }
    Ok(())
}

/// Prompt for credentials and store the bearer token, unless this
/// process already has one. The token lives only as long as the process.
pub async fn ensure_login(state: &AppState) -> anyhow::Result<()> {
    if state.tokens.is_authenticated() {
        return Ok(());
    }

    println!();
    println!(
        "  {}",
        style(format!("Log in to {}", state.config.base_url)).dim()
    );
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let bar = spinner("logging in...");
    let result = state.client.login(&email, &password).await;
    bar.finish_and_clear();

    let login = result?;
    state.tokens.set_token(login.access_token);

    match state.tokens.own_identity() {
        Some(me) => println!("  {} Logged in as user #{me}.", style("✓").green()),
        // The token works for requests even when its claims don't decode;
        // messages will just all render as the other side's.
        None => println!("  {} Logged in.", style("✓").green()),
    }
    println!();
    Ok(())
}

/// Show the account the current token belongs to.
pub async fn whoami(state: &AppState, json: bool) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let bar = spinner("fetching account...");
    let result = state.client.me().await;
    bar.finish_and_clear();

    let account = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
    } else {
        println!();
        println!(
            "  {} {} <{}>",
            style(format!("#{}", account.id)).cyan(),
            style(&account.full_name).bold(),
            account.email
        );
        println!();
    }
    Ok(())
}

/// Drop the session when the server stops accepting the token, so the
/// next action prompts for a fresh login instead of failing forever.
pub fn note_unauthorized(state: &AppState, err: &ApiError) {
    if err.is_unauthorized() {
        state.tokens.clear_token();
        println!(
            "  {} Session expired -- you'll be asked to log in again.",
            style("!").yellow().bold()
        );
    }
}
