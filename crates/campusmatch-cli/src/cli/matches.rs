//! One-shot ranked match listing.

use comfy_table::{Table, presets};
use console::style;

use campusmatch_core::api::MatchmakerApi;

use crate::state::AppState;

use super::auth::ensure_login;
use super::spinner;

/// Fetch the ranked candidates and print them as a table (or JSON).
pub async fn list_matches(state: &AppState, json: bool) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let bar = spinner("fetching matches...");
    let result = state.client.fetch_matches().await;
    bar.finish_and_clear();

    let candidates = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!();
        println!("  {}", style("No matches yet. Try again later.").dim());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Rank", "User", "Age", "Major", "Class", "Campus", "Interests", "Score",
    ]);

    for (rank, candidate) in candidates.iter().enumerate() {
        let p = &candidate.profile;
        table.add_row(vec![
            format!("{}", rank + 1),
            format!("#{}", p.user_id),
            p.age.map(|a| a.to_string()).unwrap_or_else(|| "?".to_string()),
            p.major.clone(),
            p.class_year.to_string(),
            p.campus.clone(),
            p.interests.join(", "),
            format!("{:.1}", candidate.score),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        style(format!(
            "{} candidates -- `cmatch browse` to swipe, `cmatch chat <user>` to talk",
            candidates.len()
        ))
        .dim()
    );
    println!();
    Ok(())
}
