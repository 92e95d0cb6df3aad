//! Interactive conversation loop.
//!
//! Plain lines send messages; slash commands refresh the thread or ask
//! the AI helper for openers, which become numbered quick-replies.
//! Thread redraws are driven by the `ThreadRefreshed` events the
//! controller publishes, so the view never assumes which operation
//! changed the thread.

pub mod commands;
pub mod input;

use std::sync::Arc;

use console::style;
use tokio::sync::broadcast;

use campusmatch_core::conversation::ConversationController;
use campusmatch_core::event::EventBus;
use campusmatch_infra::client::ApiClient;
use campusmatch_types::error::ChatError;
use campusmatch_types::event::SessionEvent;
use campusmatch_types::message::Authorship;
use campusmatch_types::user::UserId;

use crate::state::AppState;

use super::auth::{ensure_login, note_unauthorized};
use super::spinner;

use commands::ChatCommand;
use input::{ChatInput, InputEvent};

/// Entry point for `cmatch chat <user_id>`.
pub async fn chat_with(state: &AppState, partner: UserId) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let events = EventBus::new(64);
    let mut conversation = ConversationController::new(
        Arc::clone(&state.client),
        Arc::clone(&state.tokens),
        events.clone(),
    );
    run_chat_loop(state, &mut conversation, partner, &events).await
}

/// Run the conversation loop until the user leaves.
///
/// Also called from the browse view with its shared controller and bus.
pub async fn run_chat_loop(
    state: &AppState,
    conversation: &mut ConversationController<ApiClient>,
    partner: UserId,
    events: &EventBus,
) -> anyhow::Result<()> {
    let mut notifications = events.subscribe();

    println!();
    println!("  {}", style(format!("Chat with user #{partner}")).bold());
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to leave.").dim()
    );

    if let Err(err) = conversation.open(partner).await {
        println!("  {} {err}", style("!").yellow().bold());
        note_unauthorized(state, &err);
    }
    drain(&mut notifications);
    render_thread(conversation);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|err| anyhow::anyhow!("failed to initialize input: {err}"))?;

    // Openers from the last /suggest, selectable by number.
    let mut openers: Vec<String> = Vec::new();

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Left the chat.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Ctrl+D to leave, or keep chatting.").dim());
                continue;
            }
            InputEvent::Line(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(command) = commands::parse(&text) {
                    match command {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => break,
                        ChatCommand::Refresh => {
                            if let Err(err) = conversation.refresh_thread().await {
                                println!("  {} {err}", style("!").yellow().bold());
                                note_unauthorized(state, &err);
                            }
                        }
                        ChatCommand::Suggest => {
                            suggest(state, conversation, &mut openers).await;
                        }
                        ChatCommand::Unknown(cmd) => {
                            println!(
                                "  {} Unknown command {cmd} -- /help lists commands.",
                                style("!").yellow().bold()
                            );
                        }
                    }
                } else if let Some(n) = quick_reply(&text, openers.len()) {
                    let line = openers[n - 1].clone();
                    send(state, conversation, &line).await;
                } else {
                    send(state, conversation, &text).await;
                }
            }
        }

        if drain(&mut notifications) {
            render_thread(conversation);
        }
    }

    Ok(())
}

/// Send one message, reporting failure without leaving the loop.
async fn send(state: &AppState, conversation: &mut ConversationController<ApiClient>, text: &str) {
    match conversation.send(text).await {
        Ok(()) => {}
        Err(err) => {
            println!("  {} {err}", style("!").yellow().bold());
            if let ChatError::Api(api) = &err {
                note_unauthorized(state, api);
            }
        }
    }
}

/// Fetch AI suggestions and present the openers as numbered quick-replies.
async fn suggest(
    state: &AppState,
    conversation: &ConversationController<ApiClient>,
    openers: &mut Vec<String>,
) {
    let bar = spinner("asking for suggestions...");
    let result = conversation.fetch_suggestions().await;
    bar.finish_and_clear();

    match result {
        Ok(helper) => {
            println!();
            if !helper.summary.is_empty() {
                println!("  {}", style(&helper.summary).italic());
            }
            if helper.openers.is_empty() {
                println!("  {}", style("No suggestions this time.").dim());
            } else {
                for (i, opener) in helper.openers.iter().enumerate() {
                    println!("  {} {opener}", style(format!("[{}]", i + 1)).cyan());
                }
                println!(
                    "  {}",
                    style("Type a number to send one of these.").dim()
                );
            }
            println!();
            *openers = helper.openers;
        }
        Err(err) => {
            println!("  {} {err}", style("!").yellow().bold());
            if let ChatError::Api(api) = &err {
                note_unauthorized(state, api);
            }
        }
    }
}

/// A bare number within range selects the corresponding opener.
fn quick_reply(text: &str, count: usize) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| (1..=count).contains(n))
}

/// Drain pending notifications; true when the thread needs redrawing.
fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> bool {
    let mut dirty = false;
    loop {
        match rx.try_recv() {
            Ok(SessionEvent::ThreadRefreshed { .. }) => dirty = true,
            Ok(_) => {}
            Err(broadcast::error::TryRecvError::Lagged(_)) => dirty = true,
            Err(_) => break,
        }
    }
    dirty
}

fn render_thread(conversation: &ConversationController<ApiClient>) {
    println!();
    if conversation.thread().is_empty() {
        println!("  {}", style("No messages yet. Say hi!").dim());
        println!();
        return;
    }

    for message in conversation.thread() {
        match conversation.classify(message) {
            Authorship::Mine => {
                println!("  {} {}", style("You:").green().bold(), message.text);
            }
            Authorship::Theirs => {
                println!(
                    "  {} {}",
                    style(format!("User #{}:", message.from_user_id)).cyan().bold(),
                    message.text
                );
            }
        }
    }
    println!();
}
