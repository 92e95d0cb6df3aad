//! Interactive card-at-a-time match browsing.
//!
//! Navigation keys only move the local cursor -- pass and like are not
//! recorded server-side. Redraws are driven by the session events the
//! core components publish, not by the key handlers themselves.

use std::sync::Arc;

use console::{Term, style};
use tokio::sync::broadcast;

use campusmatch_core::browser::MatchBrowser;
use campusmatch_core::conversation::ConversationController;
use campusmatch_core::event::EventBus;
use campusmatch_infra::client::ApiClient;
use campusmatch_types::event::SessionEvent;

use crate::state::AppState;

use super::auth::{ensure_login, note_unauthorized};
use super::profile::print_profile;
use super::{chat, spinner};

/// Run the browse loop until the user quits.
pub async fn browse(state: &AppState) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let events = EventBus::new(64);
    let mut notifications = events.subscribe();
    let mut browser = MatchBrowser::new(Arc::clone(&state.client), events.clone());
    let mut conversation = ConversationController::new(
        Arc::clone(&state.client),
        Arc::clone(&state.tokens),
        events.clone(),
    );

    refresh(state, &mut browser).await;
    drain(&mut notifications);
    render_card(&browser);
    print_keys();

    let term = Term::stdout();
    loop {
        let key = term.read_char()?;
        match key {
            'n' | 'j' => browser.advance(),
            'p' | 'k' => browser.retreat(),
            'l' => {
                if let Some(candidate) = browser.current() {
                    println!(
                        "\n  {} You liked user #{}",
                        style("♥").red(),
                        candidate.profile.user_id
                    );
                }
                browser.advance();
            }
            'c' => match browser.select_for_chat() {
                Some(partner) => {
                    chat::run_chat_loop(state, &mut conversation, partner, &events).await?;
                    render_card(&browser);
                    print_keys();
                }
                None => println!("  {}", style("No match to chat with.").dim()),
            },
            'r' => refresh(state, &mut browser).await,
            'q' => break,
            '?' => print_keys(),
            _ => {}
        }

        if drain(&mut notifications) {
            render_card(&browser);
        }
    }

    Ok(())
}

/// Refresh the candidate list, reporting failure without bailing out of
/// the loop -- the previous candidates stay browsable.
async fn refresh(state: &AppState, browser: &mut MatchBrowser<ApiClient>) {
    let bar = spinner("fetching matches...");
    let result = browser.refresh().await;
    bar.finish_and_clear();

    if let Err(err) = result {
        println!("  {} {err}", style("!").yellow().bold());
        note_unauthorized(state, &err);
    }
}

/// Drain pending notifications; true when the card needs redrawing.
fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> bool {
    let mut dirty = false;
    loop {
        match rx.try_recv() {
            Ok(
                SessionEvent::MatchesRefreshed { .. } | SessionEvent::CursorMoved { .. },
            ) => dirty = true,
            Ok(_) => {}
            Err(broadcast::error::TryRecvError::Lagged(_)) => dirty = true,
            Err(_) => break,
        }
    }
    dirty
}

fn render_card(browser: &MatchBrowser<ApiClient>) {
    println!();
    let Some(candidate) = browser.current() else {
        println!("  {}", style("No matches yet. Try again later.").dim());
        return;
    };

    let position = browser.position().unwrap_or(0) + 1;
    println!(
        "  {} {}",
        style(format!("Match {position} of {}", browser.len())).bold(),
        style(format!("score {:.1}", candidate.score)).dim()
    );
    print_profile(&candidate.profile);
}

fn print_keys() {
    println!();
    println!(
        "  {}",
        style("[n]ext/pass  [p]rev  [l]ike  [c]hat  [r]efresh  [q]uit").dim()
    );
}
