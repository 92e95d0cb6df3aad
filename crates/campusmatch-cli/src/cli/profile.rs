//! Profile form and display.

use console::style;
use dialoguer::Input;

use campusmatch_types::profile::{Profile, ProfileForm};

use crate::state::AppState;

use super::auth::ensure_login;
use super::spinner;

/// Prompt the full profile form and save it.
///
/// The service treats `POST /profile` as create-or-replace, so editing
/// is just filling the form again.
pub async fn edit_profile(state: &AppState, json: bool) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let age: u32 = Input::new().with_prompt("Age").interact_text()?;
    let gender: String = Input::new()
        .with_prompt("Gender")
        .allow_empty(true)
        .interact_text()?;
    let major: String = Input::new().with_prompt("Major").interact_text()?;
    let class_year: u32 = Input::new().with_prompt("Class year").interact_text()?;
    let campus: String = Input::new().with_prompt("Campus").interact_text()?;
    let interests_raw: String = Input::new()
        .with_prompt("Interests (comma-separated)")
        .allow_empty(true)
        .interact_text()?;
    let bio: String = Input::new()
        .with_prompt("Bio")
        .allow_empty(true)
        .interact_text()?;

    let interests: Vec<String> = interests_raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let form = ProfileForm {
        age,
        gender,
        major,
        class_year,
        campus,
        interests,
        bio,
    };

    let bar = spinner("saving profile...");
    let result = state.client.save_profile(&form).await;
    bar.finish_and_clear();

    let profile = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!();
        println!("  {} Profile saved.", style("✓").green());
        println!();
    }
    Ok(())
}

/// Fetch and display the caller's saved profile.
pub async fn show_profile(state: &AppState, json: bool) -> anyhow::Result<()> {
    ensure_login(state).await?;

    let bar = spinner("fetching profile...");
    let result = state.client.my_profile().await;
    bar.finish_and_clear();

    let profile = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!();
        print_profile(&profile);
        println!();
    }
    Ok(())
}

/// Render one profile as indented label/value lines.
pub fn print_profile(profile: &Profile) {
    let age = profile
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "?".to_string());
    let gender = profile.gender.as_deref().unwrap_or("");

    println!("  {}", style(format!("User #{}", profile.user_id)).bold());
    println!(
        "  {age} • {gender} • {} • Class of {}",
        profile.major, profile.class_year
    );
    println!("  Campus: {}", profile.campus);
    println!("  Interests: {}", profile.interests.join(", "));
    println!("  Bio: {}", profile.bio);
}
